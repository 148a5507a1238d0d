mod help;
mod status;

/// Namespace for the small shared widgets.
pub struct UiComponent;
