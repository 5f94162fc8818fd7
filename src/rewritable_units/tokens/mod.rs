#[inline]
fn namespace_prefix_of(name: &str) -> &str {
    name.split_once(':').map_or("", |(prefix, _)| prefix)
}

#[inline]
fn local_name_of(name: &str) -> &str {
    name.split_once(':').map_or(name, |(_, local)| local)
}

/// The qualified name with `prefix` swapped in, or `None` if the prefix
/// doesn't change. An empty prefix removes it.
fn with_namespace_prefix(name: &str, prefix: &str) -> Option<String> {
    if namespace_prefix_of(name) == prefix {
        return None;
    }

    let local = local_name_of(name);

    Some(if prefix.is_empty() {
        local.to_owned()
    } else {
        format!("{prefix}:{local}")
    })
}

macro_rules! impl_name_api {
    ($Tag:ident) => {
        impl<'i> $Tag<'i> {
            /// The qualified tag name, as written.
            #[inline]
            pub fn name(&self) -> &str {
                &self.name
            }

            #[inline]
            pub fn set_name(&mut self, name: &str) {
                self.name = Cow::Owned(name.to_owned());
                self.raw = None;
            }

            /// The part of the name before the first `:`, or `""`.
            #[inline]
            pub fn namespace_prefix(&self) -> &str {
                super::namespace_prefix_of(&self.name)
            }

            /// Replaces the namespace prefix. An empty `prefix` removes it.
            pub fn set_namespace_prefix(&mut self, prefix: &str) {
                if let Some(name) = super::with_namespace_prefix(&self.name, prefix) {
                    self.name = Cow::Owned(name);
                }

                self.raw = None;
            }

            /// The name without its namespace prefix.
            #[inline]
            pub fn local_name(&self) -> &str {
                super::local_name_of(&self.name)
            }
        }

        impl crate::rewritable_units::HasName for $Tag<'_> {
            #[inline]
            fn name(&self) -> &str {
                Self::name(self)
            }

            #[inline]
            fn set_name(&mut self, name: &str) {
                Self::set_name(self, name)
            }

            #[inline]
            fn namespace_prefix(&self) -> &str {
                Self::namespace_prefix(self)
            }

            #[inline]
            fn set_namespace_prefix(&mut self, prefix: &str) {
                Self::set_namespace_prefix(self, prefix)
            }

            #[inline]
            fn local_name(&self) -> &str {
                Self::local_name(self)
            }
        }
    };
}

mod attributes;
mod cdata;
mod comment;
mod doctype;
mod end_tag;
mod malformed;
mod processing_instruction;
mod start_tag;
mod text;

pub use self::attributes::{Attribute, Attributes};
pub use self::cdata::Cdata;
pub use self::comment::Comment;
pub use self::doctype::Doctype;
pub use self::end_tag::EndTag;
pub use self::malformed::Malformed;
pub use self::processing_instruction::ProcessingInstruction;
pub use self::start_tag::StartTag;
pub use self::text::Text;
