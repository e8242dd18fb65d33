//! Before/after sanitization callbacks.

use std::fmt;
use std::sync::Arc;

use sanitize_model::TransformError;
use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

/// The two extension points bracketing a sanitization run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookPhase {
    /// Runs before any transform; sees the original values.
    BeforeSanitization,
    /// Runs after every transform, including the whole-record transform.
    AfterSanitization,
}

impl HookPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BeforeSanitization => "before_sanitization",
            Self::AfterSanitization => "after_sanitization",
        }
    }
}

impl fmt::Display for HookPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A sanitization callback. It may freely mutate the record.
pub type Hook<R> = Arc<dyn Fn(&mut R) -> Result<(), TransformError> + Send + Sync>;

/// Callback lists for both phases, run in registration order.
pub struct SanitizationHooks<R> {
    before: Vec<Hook<R>>,
    after: Vec<Hook<R>>,
}

impl<R> Default for SanitizationHooks<R> {
    fn default() -> Self {
        Self {
            before: Vec::new(),
            after: Vec::new(),
        }
    }
}

impl<R> Clone for SanitizationHooks<R> {
    fn clone(&self) -> Self {
        Self {
            before: self.before.clone(),
            after: self.after.clone(),
        }
    }
}

impl<R> fmt::Debug for SanitizationHooks<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SanitizationHooks")
            .field("before", &self.before.len())
            .field("after", &self.after.len())
            .finish()
    }
}

impl<R> SanitizationHooks<R> {
    /// Append a callback to `phase`.
    pub fn register<F>(&mut self, phase: HookPhase, hook: F)
    where
        F: Fn(&mut R) -> Result<(), TransformError> + Send + Sync + 'static,
    {
        let hook: Hook<R> = Arc::new(hook);
        match phase {
            HookPhase::BeforeSanitization => self.before.push(hook),
            HookPhase::AfterSanitization => self.after.push(hook),
        }
    }

    /// Number of callbacks registered for `phase`.
    pub fn len(&self, phase: HookPhase) -> usize {
        self.callbacks(phase).len()
    }

    pub fn is_empty(&self) -> bool {
        self.before.is_empty() && self.after.is_empty()
    }

    fn callbacks(&self, phase: HookPhase) -> &[Hook<R>] {
        match phase {
            HookPhase::BeforeSanitization => &self.before,
            HookPhase::AfterSanitization => &self.after,
        }
    }

    /// Run every callback for `phase`, stopping at the first failure.
    ///
    /// Returns the number of callbacks run.
    pub fn run(&self, phase: HookPhase, record: &mut R) -> Result<usize, PipelineError> {
        let callbacks = self.callbacks(phase);
        for (index, hook) in callbacks.iter().enumerate() {
            hook(&mut *record).map_err(|source| PipelineError::Hook {
                phase,
                index,
                source,
            })?;
        }
        if !callbacks.is_empty() {
            tracing::trace!(%phase, count = callbacks.len(), "ran sanitization callbacks");
        }
        Ok(callbacks.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn callbacks_run_in_registration_order() {
        let mut hooks: SanitizationHooks<Vec<&'static str>> = SanitizationHooks::default();
        hooks.register(HookPhase::BeforeSanitization, |log| {
            log.push("first");
            Ok(())
        });
        hooks.register(HookPhase::BeforeSanitization, |log| {
            log.push("second");
            Ok(())
        });

        let mut log = Vec::new();
        let count = hooks.run(HookPhase::BeforeSanitization, &mut log).unwrap();
        assert_eq!(count, 2);
        assert_eq!(log, vec!["first", "second"]);
        assert_eq!(hooks.run(HookPhase::AfterSanitization, &mut log).unwrap(), 0);
    }

    #[test]
    fn failing_callback_stops_the_phase() {
        let mut hooks: SanitizationHooks<Vec<&'static str>> = SanitizationHooks::default();
        hooks.register(HookPhase::AfterSanitization, |_| {
            Err(TransformError::message("halt"))
        });
        hooks.register(HookPhase::AfterSanitization, |log| {
            log.push("unreachable");
            Ok(())
        });

        let mut log = Vec::new();
        let err = hooks.run(HookPhase::AfterSanitization, &mut log).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Hook {
                phase: HookPhase::AfterSanitization,
                index: 0,
                ..
            }
        ));
        assert!(log.is_empty());
    }

    #[test]
    fn phase_names() {
        assert_eq!(HookPhase::BeforeSanitization.to_string(), "before_sanitization");
        assert_eq!(HookPhase::AfterSanitization.to_string(), "after_sanitization");
    }
}
