//! The unit of submitted work.

use std::future::Future;

use async_trait::async_trait;

/// A zero-argument asynchronous operation yielding a value or an error
/// message.
///
/// The scheduler may invoke the same action more than once: a failed run is
/// re-queued until the retry budget is exhausted, and each retry calls
/// `run()` again on the same action.
///
/// Any `Fn() -> Future<Output = Result<T, String>>` closure is an `Action`,
/// so plain closures can be submitted directly. Implement the trait by hand
/// when the action carries its own state.
#[async_trait]
pub trait Action<T>: Send + Sync {
    async fn run(&self) -> Result<T, String>;
}

#[async_trait]
impl<T, F, Fut> Action<T> for F
where
    T: Send + 'static,
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<T, String>> + Send,
{
    async fn run(&self) -> Result<T, String> {
        (self)().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Doubler {
        input: u32,
    }

    #[async_trait]
    impl Action<u32> for Doubler {
        async fn run(&self) -> Result<u32, String> {
            Ok(self.input * 2)
        }
    }

    #[tokio::test]
    async fn closures_are_actions() {
        let action = || async { Ok::<_, String>(41 + 1) };
        assert_eq!(action.run().await, Ok(42));
    }

    #[tokio::test]
    async fn structs_can_implement_action() {
        let action = Doubler { input: 21 };
        assert_eq!(action.run().await, Ok(42));
    }

    #[tokio::test]
    async fn rerunning_an_action_reinvokes_it() {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicU32, Ordering};

        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);
        let action = move || {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok::<_, String>(())
            }
        };

        action.run().await.unwrap();
        action.run().await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
