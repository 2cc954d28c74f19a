use super::{core::Effect, core::State, main::Identifier};
use crate::identifier::core::{init, transition};
use crate::identifier::render::view;
use std::time::Duration;

impl Identifier {
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let state = self.start()?;
        self.run_until(state, |_| false, None)?;
        Ok(())
    }

    /// Renders the initial state and kicks off model loading.
    pub fn start(&self) -> Result<State, Box<dyn std::error::Error + Send + Sync>> {
        let (state, effects) = init();

        self.render(&state)?;
        self.execute_effects(effects);

        Ok(state)
    }

    /// Processes messages one at a time until `done` holds. With a timeout,
    /// gives up if no message arrives in time.
    pub fn run_until(
        &self,
        mut current_state: State,
        done: impl Fn(&State) -> bool,
        timeout: Option<Duration>,
    ) -> Result<State, Box<dyn std::error::Error + Send + Sync>> {
        while !done(&current_state) {
            let msg = {
                let receiver = self
                    .msg_receiver
                    .lock()
                    .map_err(|_| "message receiver lock poisoned")?;
                match timeout {
                    Some(timeout) => receiver.recv_timeout(timeout)?,
                    None => receiver.recv()?,
                }
            };

            let _ = self.logger.info(&format!(
                "\nold state:\n\t{:?}\n\nmsg:\n\t{:?}",
                current_state, msg,
            ));

            let (new_state, effects) = transition(current_state, msg);

            let _ = self.logger.info(&format!(
                "\nnew state:\n\t{:?}\n\neffects:\n\t{:?}",
                new_state, effects
            ));

            current_state = new_state;

            self.render(&current_state)?;

            self.execute_effects(effects);
        }

        Ok(current_state)
    }

    fn render(&self, state: &State) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let view = view(state);
        let mut display = self
            .display
            .lock()
            .map_err(|_| "display lock poisoned")?;
        display.render(&view)
    }

    fn execute_effects(&self, effects: Vec<Effect>) {
        for effect in effects {
            let self_clone = self.clone();
            std::thread::spawn(move || self_clone.run_effect(effect));
        }
    }
}
