use shallow_xml::*;

fn rewrite(input: &str, mut f: impl FnMut(&mut Token<'_>)) -> String {
    concatenate(
        tokenize(input).map(|mut token| {
            f(&mut token);
            token
        }),
        None,
    )
}

#[test]
fn untouched_tokens_keep_their_quoting() {
    let input = r#"<a title='say "hi"' b = "1">x</a>"#;

    assert_eq!(rewrite(input, |_| ()), input);
}

#[test]
fn mutation_normalizes_quoting() {
    let output = rewrite(r#"<a title='say "hi"'>x</a>"#, |token| {
        if let Token::StartTag(tag) = token {
            tag.set_attribute("lang", "en");
        }
    });

    assert_eq!(output, r#"<a title="say &quot;hi&quot;" lang="en">x</a>"#);
}

#[test]
fn attribute_order_after_delete_and_insert() {
    let mut tag = StartTag::parse(r#"<e a="1" b="2" c="3">"#).unwrap();

    assert!(tag.remove_attribute("b"));
    assert!(!tag.remove_attribute("missing"));
    tag.set_attribute("d", "4");

    assert_eq!(tag.xml(), r#"<e a="1" c="3" d="4">"#);

    tag.set_attribute_order(&["d", "zz"], true);
    assert_eq!(tag.xml(), r#"<e d="4" a="1" c="3">"#);
}

#[test]
fn sorted_attribute_order_ignores_case() {
    let mut tag = StartTag::parse(r#"<e b="1" C="2" a="3" id="4"/>"#).unwrap();

    tag.set_attribute_order(&["id"], true);

    assert_eq!(tag.xml(), r#"<e id="4" a="3" b="1" C="2"/>"#);
}

#[test]
fn namespace_prefix_and_name_stay_consistent() {
    let mut token = Token::parse("<xhtml:p>").unwrap();
    let named = token.as_named_mut().unwrap();

    named.set_namespace_prefix("");
    assert_eq!(named.name(), "p");

    assert_eq!(token.xml(), "<p>");

    let named = token.as_named_mut().unwrap();

    named.set_name("html:p");
    assert_eq!(named.namespace_prefix(), "html");
    assert_eq!(named.local_name(), "p");
    assert_eq!(token.xml(), "<html:p>");
}

#[test]
fn renaming_a_matching_pair() {
    let output = rewrite("<b>bold</b> and <i>not</i>", |token| {
        if token.is_a(TokenKinds::TAGS, &["b"]) {
            if let Some(named) = token.as_named_mut() {
                named.set_name("strong");
            }
        }
    });

    assert_eq!(output, "<strong>bold</strong> and <i>not</i>");
}

#[test]
fn cdata_becomes_escaped_text() {
    let output = rewrite("<x><![CDATA[<markup/> & more]]></x>", |token| {
        if let Token::Cdata(cdata) = token {
            *token = Token::Text(cdata.to_text_token());
        }
    });

    assert_eq!(output, "<x>&lt;markup/> &amp; more</x>");
}

#[test]
fn xml_declaration_pseudo_attributes() {
    let mut token = Token::parse(r#"<?xml version="1.0" encoding='latin1'?>"#).unwrap();

    assert_eq!(token.kind(), TokenKind::XmlDecl);

    let attributes = token.as_attributes_mut().unwrap();

    assert_eq!(attributes.get_attribute("encoding"), Some("latin1"));

    attributes.set_attribute("encoding", "utf-8");
    assert_eq!(token.xml(), r#"<?xml version="1.0" encoding="utf-8"?>"#);

    let Token::Pi(decl) = &mut token else {
        unreachable!()
    };

    decl.set_pseudo_attribute("standalone", "yes");
    assert!(decl.remove_pseudo_attribute("version"));
    assert!(!decl.remove_pseudo_attribute("version"));

    assert_eq!(decl.xml(), r#"<?xml encoding="utf-8" standalone="yes"?>"#);
}

#[test]
fn stylesheet_instruction() {
    let output = rewrite(
        "<?xml-stylesheet type='text/xsl' href='old.xsl'?><doc/>",
        |token| {
            if token.is_a(TokenKinds::PI, &["xml-stylesheet"]) {
                if let Some(attributes) = token.as_attributes_mut() {
                    attributes.set_attribute("href", "new.xsl");
                }
            }
        },
    );

    assert_eq!(
        output,
        r#"<?xml-stylesheet type='text/xsl' href="new.xsl"?><doc/>"#
    );
}

#[test]
fn doctype_fields() {
    let output = rewrite(
        r#"<!DOCTYPE doc SYSTEM "doc.dtd" [<!ENTITY e "v">]><doc/>"#,
        |token| {
            if let Token::Doctype(doctype) = token {
                assert_eq!(doctype.document_element(), "doc");
                assert_eq!(doctype.id_value(), "doc.dtd");

                doctype.set_id_value("other.dtd");
                doctype.set_internal_subset("");
            }
        },
    );

    assert_eq!(output, r#"<!DOCTYPE doc SYSTEM "other.dtd"><doc/>"#);
}

#[test]
fn malformed_markup_can_be_repaired() {
    let output = rewrite("<p>Some <i text.</p>", |token| {
        if let Token::Malformed(malformed) = token {
            assert_eq!(malformed.span(), 8..11);

            malformed.set_markup("<i/>");
        }
    });

    assert_eq!(output, "<p>Some <i/>text.</p>");
}

#[test]
fn reserialization_is_idempotent() {
    let mut tokens: Vec<_> = tokenize(
        r#"<?pi  a='1'?><!DOCTYPE d><d x = 'y'><!--c--><![CDATA[z]]></d>"#,
    )
    .collect();

    for token in &mut tokens {
        token.reserialize();

        let first = token.xml().to_owned();

        token.reserialize();

        assert_eq!(token.xml(), first);
        assert!(!token.is_dirty());
    }

    assert_eq!(
        concatenate(&tokens, None),
        r#"<?pi a='1'?><!DOCTYPE d><d x="y"><!--c--><![CDATA[z]]></d>"#
    );
}
