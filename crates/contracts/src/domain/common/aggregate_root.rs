use std::fmt::Display;

/// Root of an aggregate served by the REST backend.
///
/// Static metadata used by the API layer for paths and by pages for labels.
pub trait AggregateRoot {
    type Id: Display;

    /// Collection segment in the API (e.g. "pedidos")
    fn collection_name() -> &'static str;

    /// Singular name shown in the UI
    fn element_name() -> &'static str;

    /// Path of the collection under the API prefix ("/pedidos")
    fn collection_path() -> String {
        format!("/{}", Self::collection_name())
    }

    /// Path of one record ("/pedidos/12")
    fn item_path(id: Self::Id) -> String {
        format!("/{}/{}", Self::collection_name(), id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Viagem;

    impl AggregateRoot for Viagem {
        type Id = i64;

        fn collection_name() -> &'static str {
            "viagens"
        }

        fn element_name() -> &'static str {
            "Viagem"
        }
    }

    #[test]
    fn test_paths() {
        assert_eq!(Viagem::collection_path(), "/viagens");
        assert_eq!(Viagem::item_path(12), "/viagens/12");
    }
}
