use shallow_xml::*;
use static_assertions::{assert_impl_all, assert_not_impl_any};
use std::error::Error;
use std::fmt::Debug;

assert_impl_all!(Token<'static>: Clone, Debug, PartialEq, Send, Sync);
assert_impl_all!(Lexer<'static>: Clone, Debug, Iterator, Send, Sync);
assert_impl_all!(Attributes<'static>: Clone, Debug, Default);

assert_impl_all!(TokenError: Error, Clone, Send, Sync);
assert_impl_all!(TemplateError: Error, Clone, Send, Sync);
assert_impl_all!(AccumulationError: Error, Copy, Send, Sync);
assert_impl_all!(WellformednessError: Error, Clone, Send, Sync);

// Diagnostic handlers are plain boxed closures.
assert_not_impl_any!(Tokenizer<'static, 'static>: Send, Sync, Clone);
assert_not_impl_any!(Settings<'static>: Send, Sync);
