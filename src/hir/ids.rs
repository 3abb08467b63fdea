//! Arena handles issued by the [`Program`](super::Program) index.
//!
//! Handles are dense indices into the program's arenas. They are only
//! meaningful relative to the program that issued them and are invalidated
//! when the host rebuilds it.

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(u32);

        impl $name {
            pub const fn new(raw: u32) -> Self {
                Self(raw)
            }

            pub const fn index(self) -> usize {
                self.0 as usize
            }

            pub const fn raw(self) -> u32 {
                self.0
            }
        }
    };
}

define_id!(
    /// A class, interface or enum declaration.
    ClassId
);
define_id!(
    /// A method or constructor.
    MethodId
);
define_id!(
    /// A variable declaration: local, parameter or field.
    SymbolId
);
define_id!(
    /// A value-producing expression.
    ExprId
);
