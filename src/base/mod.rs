mod text;

pub(crate) use self::text::{ceil_char_boundary, replace_char, replace_char2};
