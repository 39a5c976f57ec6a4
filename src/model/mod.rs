//! Plain documents and payloads for every collection.
//!
//! Each document type implements [`ActorEntity`](document_actor::ActorEntity) in its
//! `*_actor::entity` module; this module only holds the data.

/// Declares a `u32` newtype id that displays with a collection prefix (`order_3`).
macro_rules! document_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            serde::Serialize, serde::Deserialize,
        )]
        pub struct $name(pub u32);

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                Self(id)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($prefix, "_{}"), self.0)
            }
        }
    };
}

pub(crate) use document_id;

pub mod chat;
pub mod order;
pub mod product;
pub mod user;
pub mod wishlist;

pub use chat::*;
pub use order::*;
pub use product::*;
pub use user::*;
pub use wishlist::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_display_with_prefix() {
        assert_eq!(OrderId(3).to_string(), "order_3");
        assert_eq!(ProductId(1).to_string(), "product_1");
        assert_eq!(WishlistEntryId(9).to_string(), "wish_9");
    }
}
