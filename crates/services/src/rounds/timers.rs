use tokio::task::JoinHandle;

/// Outstanding timer tasks for the round in play.
///
/// Cancelling aborts every task; a new round arms its timers only after the
/// previous round's set has been cancelled.
#[derive(Debug, Default)]
pub(crate) struct RoundTimers {
    handles: Vec<JoinHandle<()>>,
}

impl RoundTimers {
    pub(crate) fn arm(&mut self, handle: JoinHandle<()>) {
        self.handles.retain(|handle| !handle.is_finished());
        self.handles.push(handle);
    }

    /// Abort every armed timer. Returns how many were still pending.
    pub(crate) fn cancel_all(&mut self) -> usize {
        let mut pending = 0;
        for handle in self.handles.drain(..) {
            if !handle.is_finished() {
                pending += 1;
            }
            handle.abort();
        }
        pending
    }

    pub(crate) fn pending(&self) -> usize {
        self.handles
            .iter()
            .filter(|handle| !handle.is_finished())
            .count()
    }
}

impl Drop for RoundTimers {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn cancel_all_aborts_pending_tasks() {
        let mut timers = RoundTimers::default();
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        for n in 0..3 {
            let tx = tx.clone();
            timers.arm(tokio::spawn(async move {
                tokio::time::sleep(Duration::from_secs(1)).await;
                let _ = tx.send(n);
            }));
        }
        assert_eq!(timers.pending(), 3);

        assert_eq!(timers.cancel_all(), 3);
        assert_eq!(timers.pending(), 0);
        drop(tx);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(rx.recv().await, None);
    }
}
