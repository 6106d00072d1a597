use std::fmt::Debug;

use async_trait::async_trait;

use super::Verdict;

/// Post-hoc check that an answer is supported by the evidence it was built from
///
/// Infallible by contract: implementations map their own failures to
/// [`Verdict::Fail`].
#[async_trait]
pub trait Verifier: Send + Sync + Debug {
    async fn verify(&self, query: &str, answer: &str, evidence: &str) -> Verdict;
}

#[cfg(test)]
pub mod mock {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[derive(Debug)]
    pub struct MockVerifier {
        verdict: Verdict,
        calls: AtomicUsize,
    }

    impl MockVerifier {
        pub fn new(verdict: Verdict) -> Self {
            Self {
                verdict,
                calls: AtomicUsize::new(0),
            }
        }

        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Verifier for MockVerifier {
        async fn verify(&self, _query: &str, _answer: &str, _evidence: &str) -> Verdict {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.verdict
        }
    }
}
