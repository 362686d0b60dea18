use std::time::Duration;

use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::{self, MissedTickBehavior};

use crate::error::{AppError, AppResult};
use crate::event::DomainEvent;

use super::core::App;
use super::event_bus::EventBusRuntime;
use super::terminal_session::{TerminalSession, TerminalSurface};

enum WaitEvent {
    Event(DomainEvent),
    Tick,
    Closed,
}

enum LoopControl {
    Continue,
    Break,
}

impl App {
    pub async fn run(&mut self) -> AppResult<()> {
        let mut session = TerminalSession::enter()?;
        let (mut events, mut bus) = EventBusRuntime::spawn();
        let mut tick = time::interval(Duration::from_millis(self.config.ui.poll_interval_ms));
        tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

        tracing::info!("event loop started");
        let result = self.run_loop(&mut session, &mut events, &mut tick).await;

        bus.shutdown();
        self.shutdown();
        session
            .restore()
            .map_err(|err| AppError::io_with_context(err, "restoring terminal"))?;
        tracing::info!(ok = result.is_ok(), "event loop finished");
        result
    }

    async fn run_loop(
        &mut self,
        session: &mut impl TerminalSurface,
        events: &mut UnboundedReceiver<DomainEvent>,
        tick: &mut time::Interval,
    ) -> AppResult<()> {
        let mut needs_redraw = true;
        loop {
            if self.drain_background() {
                needs_redraw = true;
            }
            if needs_redraw {
                session
                    .draw(|frame| self.draw_frame(frame))
                    .map_err(|err| AppError::io_with_context(err, "drawing frame"))?;
                needs_redraw = false;
            }

            let waited = wait_next_event(events, tick).await;
            match self.handle_waited_event(waited, &mut needs_redraw)? {
                LoopControl::Continue => {}
                LoopControl::Break => return Ok(()),
            }
        }
    }

    fn handle_waited_event(
        &mut self,
        waited: WaitEvent,
        needs_redraw: &mut bool,
    ) -> AppResult<LoopControl> {
        match waited {
            WaitEvent::Event(DomainEvent::Input(event)) => {
                let outcome = self.handle_input_event(event)?;
                if outcome.quit_requested {
                    return Ok(LoopControl::Break);
                }
                *needs_redraw |= outcome.redraw;
            }
            WaitEvent::Event(DomainEvent::InputError(message)) => {
                tracing::warn!(%message, "terminal input error");
                self.state.status.message = format!("input error: {message}");
                *needs_redraw = true;
            }
            WaitEvent::Tick => {}
            WaitEvent::Closed => return Ok(LoopControl::Break),
        }
        Ok(LoopControl::Continue)
    }
}

async fn wait_next_event(
    events: &mut UnboundedReceiver<DomainEvent>,
    tick: &mut time::Interval,
) -> WaitEvent {
    tokio::select! {
        biased;
        maybe_event = events.recv() => match maybe_event {
            Some(event) => WaitEvent::Event(event),
            None => WaitEvent::Closed,
        },
        _ = tick.tick() => WaitEvent::Tick,
    }
}
