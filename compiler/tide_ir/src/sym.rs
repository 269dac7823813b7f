//! Reserved symbols pre-interned at fixed indices.
//!
//! The interner seeds its table from [`PRE_INTERNED`] in order, so each
//! constant below is valid for every [`StringInterner`](crate::StringInterner)
//! without a lookup.

use crate::Name;

macro_rules! reserved_symbols {
    ($($konst:ident = $index:literal => $text:literal,)*) => {
        $(
            #[doc = concat!("Pre-interned `", $text, "`.")]
            pub const $konst: Name = Name::from_raw($index);
        )*

        /// Symbols seeded into every interner, indexed by their raw `Name`.
        pub const PRE_INTERNED: &[&str] = &["", $($text,)*];
    };
}

reserved_symbols! {
    BREAK = 1 => "break",
    CONTINUE = 2 => "continue",
    RETURN = 3 => "return",
    EXIT = 4 => "exit",
    QUIT = 5 => "quit",
    NONE = 6 => "none",
    TRUE = 7 => "true",
    FALSE = 8 => "false",
    ON = 9 => "on",
    OFF = 10 => "off",
    YES = 11 => "yes",
    NO = 12 => "no",
    ID = 13 => "id",
    MESSAGE = 14 => "message",
}
