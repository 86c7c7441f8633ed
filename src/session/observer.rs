use crate::evaluator::TurnFeedback;
use crate::scorer::ScoreResult;
use crate::stimulus::Stimulus;
use tokio::sync::mpsc::UnboundedSender;

/// Session notifications for the UI layer.
pub trait SessionObserver: Send {
    fn on_countdown(&mut self, _remaining: u32) {}

    fn on_tick(&mut self, stimulus: &Stimulus);

    /// Only called when feedback is enabled and the session is not a demo.
    fn on_feedback(&mut self, _feedback: &TurnFeedback) {}

    fn on_complete(&mut self, result: &ScoreResult);

    fn on_demo_complete(&mut self) {}
}

impl<O: SessionObserver + ?Sized> SessionObserver for Box<O> {
    fn on_countdown(&mut self, remaining: u32) {
        (**self).on_countdown(remaining)
    }

    fn on_tick(&mut self, stimulus: &Stimulus) {
        (**self).on_tick(stimulus)
    }

    fn on_feedback(&mut self, feedback: &TurnFeedback) {
        (**self).on_feedback(feedback)
    }

    fn on_complete(&mut self, result: &ScoreResult) {
        (**self).on_complete(result)
    }

    fn on_demo_complete(&mut self) {
        (**self).on_demo_complete()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Countdown(u32),
    Tick(Stimulus),
    Feedback(TurnFeedback),
    Complete(ScoreResult),
    DemoComplete,
}

/// Forwards every notification as a [`SessionEvent`]. A closed receiver is
/// not an error; the events are dropped.
impl SessionObserver for UnboundedSender<SessionEvent> {
    fn on_countdown(&mut self, remaining: u32) {
        let _ = self.send(SessionEvent::Countdown(remaining));
    }

    fn on_tick(&mut self, stimulus: &Stimulus) {
        let _ = self.send(SessionEvent::Tick(*stimulus));
    }

    fn on_feedback(&mut self, feedback: &TurnFeedback) {
        let _ = self.send(SessionEvent::Feedback(*feedback));
    }

    fn on_complete(&mut self, result: &ScoreResult) {
        let _ = self.send(SessionEvent::Complete(*result));
    }

    fn on_demo_complete(&mut self) {
        let _ = self.send(SessionEvent::DemoComplete);
    }
}
