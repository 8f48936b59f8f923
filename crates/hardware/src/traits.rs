//! Synchronous component trait.
//!
//! Every clocked block in the model implements `Clocked`: the whole state
//! advances once per active clock edge, computed from the current state and
//! the inputs sampled at that edge. There is no asynchronous logic.

/// A single-clock-domain component advanced one active edge at a time.
pub trait Clocked {
    /// Input signals sampled at the clock edge.
    type Input;
    /// Output signals after the edge has been applied.
    type Output;

    /// Applies one active clock edge and returns the resulting outputs.
    fn tick(&mut self, input: Self::Input) -> Self::Output;

    /// Returns the component to its power-on state.
    fn reset(&mut self);
}
