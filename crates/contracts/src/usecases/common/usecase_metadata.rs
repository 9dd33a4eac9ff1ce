/// Identity of a use case: page keys, titles and sidebar hints
pub trait UseCaseMetadata {
    /// e.g. "u001"
    fn usecase_index() -> &'static str;

    /// Technical name, e.g. "settlement"
    fn usecase_name() -> &'static str;

    /// Title shown in the UI
    fn display_name() -> &'static str;

    fn description() -> &'static str {
        ""
    }

    /// "u001_settlement"
    fn full_name() -> String {
        format!("{}_{}", Self::usecase_index(), Self::usecase_name())
    }
}
