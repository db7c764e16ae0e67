//! Base trait for intents (user/system actions) in MVI architecture.

/// Marker trait for intent objects.
///
/// Intents represent:
/// - User actions (button clicks, text input)
/// - Events routed in by a parent component
/// - Navigation events
///
/// Intents are handed to an executor, which turns them into messages.
pub trait Intent: Send + 'static {}
