// -------------------------------------------------------------------------------------------------
//  Copyright (C) 2015-2025 Nautech Systems Pty Ltd. All rights reserved.
//  https://nautechsystems.io
//
//  Licensed under the GNU Lesser General Public License Version 3.0 (the "License");
//  You may not use this file except in compliance with the License.
//  You may obtain a copy of the License at https://www.gnu.org/licenses/lgpl-3.0.en.html
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.
// -------------------------------------------------------------------------------------------------

//! Bounded-concurrency batch execution for independent HTTP operations.

use std::future::Future;

use futures_util::future::join_all;

use super::error::HttpResult;

/// Runs `operations` in windows of at most `batch_size` concurrent futures.
///
/// Results are returned in the order the operations were given. A window must complete in full
/// before the next one starts. With `abort_on_error`, no further window starts after one that
/// produced a failure; operations never started are simply absent from the output, so the
/// returned vector may be shorter than the input.
pub async fn execute_batch<T, F, Fut>(
    operations: Vec<F>,
    batch_size: usize,
    abort_on_error: bool,
) -> Vec<HttpResult<T>>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = HttpResult<T>>,
{
    let total = operations.len();
    let batch_size = batch_size.max(1);
    let mut results = Vec::with_capacity(total);
    let mut remaining = operations.into_iter();

    loop {
        let window: Vec<_> = remaining.by_ref().take(batch_size).collect();
        if window.is_empty() {
            break;
        }

        tracing::debug!(
            "Executing batch window of {} ({}/{total} started)",
            window.len(),
            results.len() + window.len(),
        );
        let window_results = join_all(window.into_iter().map(|op| op())).await;
        let failed = window_results.iter().any(Result::is_err);
        results.extend(window_results);

        if abort_on_error && failed {
            tracing::warn!(
                "Aborting batch after failed window ({}/{total} executed)",
                results.len(),
            );
            break;
        }
    }

    results
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use rstest::rstest;

    use super::*;
    use crate::http::error::HttpClientError;

    #[rstest]
    #[tokio::test]
    async fn test_results_preserve_input_order() {
        let ops: Vec<_> = (0..5_u64)
            .map(|i| move || async move { Ok::<_, HttpClientError>(i) })
            .collect();

        let results = execute_batch(ops, 2, false).await;

        let values: Vec<_> = results.into_iter().map(Result::unwrap).collect();
        assert_eq!(values, vec![0, 1, 2, 3, 4]);
    }

    #[rstest]
    #[tokio::test]
    async fn test_concurrency_bounded_by_batch_size() {
        let in_flight = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let ops: Vec<_> = (0..7)
            .map(|_| {
                let in_flight = in_flight.clone();
                let peak = peak.clone();
                move || async move {
                    let current = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(current, Ordering::SeqCst);
                    tokio::time::sleep(std::time::Duration::from_millis(10)).await;
                    in_flight.fetch_sub(1, Ordering::SeqCst);
                    Ok::<_, HttpClientError>(())
                }
            })
            .collect();

        let results = execute_batch(ops, 3, false).await;

        assert_eq!(results.len(), 7);
        assert!(peak.load(Ordering::SeqCst) <= 3);
    }

    #[rstest]
    #[tokio::test]
    async fn test_abort_on_error_skips_later_windows() {
        let executed = Arc::new(AtomicUsize::new(0));

        let ops: Vec<_> = (0..6)
            .map(|i| {
                let executed = executed.clone();
                move || async move {
                    executed.fetch_add(1, Ordering::SeqCst);
                    if i == 1 {
                        Err(HttpClientError::Network("connection reset".to_string()))
                    } else {
                        Ok(i)
                    }
                }
            })
            .collect();

        let results = execute_batch(ops, 2, true).await;

        // The failing window completes, later windows never start
        assert_eq!(results.len(), 2);
        assert_eq!(executed.load(Ordering::SeqCst), 2);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
    }

    #[rstest]
    #[tokio::test]
    async fn test_failures_recorded_without_abort() {
        let ops: Vec<_> = (0..4)
            .map(|i| {
                move || async move {
                    if i % 2 == 0 {
                        Ok(i)
                    } else {
                        Err(HttpClientError::Network("connection reset".to_string()))
                    }
                }
            })
            .collect();

        let results = execute_batch(ops, 2, false).await;

        assert_eq!(results.len(), 4);
        assert_eq!(results.iter().filter(|r| r.is_err()).count(), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn test_empty_input_yields_empty_output() {
        let ops: Vec<fn() -> std::future::Ready<HttpResult<()>>> = vec![];
        let results = execute_batch(ops, 3, true).await;
        assert!(results.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn test_zero_batch_size_treated_as_one() {
        let ops: Vec<_> = (0..3_u64)
            .map(|i| move || async move { Ok::<_, HttpClientError>(i) })
            .collect();

        let results = execute_batch(ops, 0, false).await;
        assert_eq!(results.len(), 3);
    }
}
