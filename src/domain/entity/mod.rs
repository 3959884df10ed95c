pub mod catalog;

/// Storage assigned identifier.
pub type EntityId = i64;

pub trait Entity {
    fn ident(&self) -> Option<EntityId>;

    /// Whether the entity was never saved.
    fn is_transient(&self) -> bool {
        self.ident().is_none()
    }
}

macro_rules! impl_entity {
    ($type:ty) => {
        impl crate::domain::entity::Entity for $type {
            fn ident(&self) -> Option<crate::domain::entity::EntityId> {
                self.id
            }
        }
    };
}

macro_rules! state_ref {
    ($prop:ident, $rtrn:ty) => {
        pub fn $prop(&self) -> &$rtrn {
            &self.state.$prop
        }
    };
}

pub(self) use impl_entity;
pub(self) use state_ref;
