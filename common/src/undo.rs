use crate::error::ShotResult;

type UndoStep<'a> = Box<dyn FnOnce() -> ShotResult<()> + 'a>;

/// Records how to reverse each step of a multi-step filesystem operation. Unless the log is
/// committed, dropping it runs the recorded steps newest first. Undo is best effort: the error
/// which caused the unwinding is the one the caller reports.
#[derive(Default)]
pub struct UndoLog<'a> {
    steps: Vec<UndoStep<'a>>,
}

impl<'a> UndoLog<'a> {
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    pub fn record<F>(&mut self, step: F)
    where
        F: FnOnce() -> ShotResult<()> + 'a,
    {
        self.steps.push(Box::new(step));
    }

    pub fn commit(mut self) {
        self.steps.clear();
    }
}

impl Drop for UndoLog<'_> {
    fn drop(&mut self) {
        while let Some(step) = self.steps.pop() {
            let _ = step();
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::ShotError;
    use std::cell::RefCell;

    #[test]
    fn test_dropped_log_undoes_in_reverse() {
        let done = RefCell::new(Vec::new());

        {
            let mut log = UndoLog::new();
            log.record(|| {
                done.borrow_mut().push(1);
                Ok(())
            });
            log.record(|| {
                done.borrow_mut().push(2);
                Err(ShotError::NotFound)
            });
            log.record(|| {
                done.borrow_mut().push(3);
                Ok(())
            });
        }

        assert_eq!(vec![3, 2, 1], *done.borrow());
    }

    #[test]
    fn test_committed_log_does_nothing() {
        let done = RefCell::new(Vec::<u8>::new());

        let mut log = UndoLog::new();
        log.record(|| {
            done.borrow_mut().push(1);
            Ok(())
        });
        log.commit();

        assert!(done.borrow().is_empty());
    }
}
