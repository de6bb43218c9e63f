/// A domain-agnostic event.
///
/// Events are facts about an edit that already happened. They are versioned so
/// the shape can evolve without breaking consumers that replay them.
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Stable event name/type identifier (e.g. "invoicing.draft.line_added").
    fn event_type(&self) -> &'static str;

    /// Schema version for this event type.
    fn version(&self) -> u32;
}
