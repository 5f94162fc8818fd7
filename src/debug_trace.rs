use cfg_if::cfg_if;

cfg_if! {
    if #[cfg(feature = "debug_trace")] {
        macro_rules! trace {
            ( @lexeme $lexeme:expr ) => {
                println!("@lexeme {:?} {:?}: {:?}", $lexeme.kind, $lexeme.span, $lexeme.raw);
            };

            ( @rebuild $kind:expr, $xml:expr ) => {
                println!("@rebuild {:?}: {:?}", $kind, $xml);
            };

            ( @accumulate $name:expr, $depth:expr ) => {
                println!("@accumulate <{}> depth={}", $name, $depth);
            };
        }
    } else {
        macro_rules! trace {
            ( @$ty:ident $($args:tt)+ ) => {};
        }
    }
}
