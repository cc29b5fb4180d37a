//! Batch header verification. Rule evaluation is parallelized across one worker per logical CPU;
//! results are always emitted in input order regardless of completion order, and a cancellation
//! signal lets in-flight work abort between headers without leaving partial mutations (the
//! validator never mutates state, so "draining" just means stopping early).

use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;

use crate::{
    error::ValidationError,
    proof::ProofVerifier,
    validator::{validate_header, ValidationParams},
};
use poc_types::{Crypto, Header, H256};

/// One header's inputs for batch validation: the header itself, its immediate parent and the
/// parent's canonical hash.
pub struct BatchItem<'a> {
    pub header: &'a Header,
    pub parent: &'a Header,
    pub parent_hash: H256,
    pub params: ValidationParams,
}

/// Aborts in-flight batch dispatch. Workers that have already started a header's rule chain run
/// it to completion; no rule is left half-evaluated.
#[derive(Default)]
pub struct AbortSignal(AtomicBool);

impl AbortSignal {
    #[must_use]
    pub fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    pub fn abort(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_aborted(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Validates every item in `batch`, one worker per logical CPU, and returns results in the same
/// order as `batch`. `None` at index `i` means validation of that header was never dispatched
/// because `abort` was already signaled when its turn came up.
pub fn validate_batch<C: Crypto + Sync, P: ProofVerifier + Sync>(
    batch: &[BatchItem<'_>],
    proof_verifier: &P,
    abort: &AbortSignal,
) -> Vec<Option<Result<(), ValidationError>>>
where
    P::Error: Send,
{
    tracing::debug!(len = batch.len(), "validating header batch");
    let results: Vec<Option<Result<(), ValidationError>>> = batch
        .par_iter()
        .map(|item| {
            if abort.is_aborted() {
                return None;
            }
            Some(validate_header::<C, P>(
                item.header,
                item.parent,
                item.parent_hash,
                proof_verifier,
                item.params,
            ))
        })
        .collect();
    if results.iter().any(Option::is_none) {
        tracing::warn!("header batch aborted before completion");
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proof::ProofVerifier;
    use poc_types::{header::Pid, Bytes, DefaultCrypto, U256};

    struct AlwaysValid;

    impl ProofVerifier for AlwaysValid {
        type Error = std::convert::Infallible;

        fn verified_quality(
            &self,
            _proof: &Bytes,
            _pid: Pid,
            _challenge: H256,
            _slot: u64,
            _number: u64,
            _k: u8,
        ) -> Result<U256, Self::Error> {
            Ok(U256::MAX)
        }
    }

    fn header_at(number: u64, timestamp: u64) -> Header {
        Header {
            parent_hash: H256::zero(),
            ommers_hash: H256::zero(),
            beneficiary: Default::default(),
            state_root: H256::zero(),
            transactions_root: H256::zero(),
            receipts_root: H256::zero(),
            logs_bloom: Default::default(),
            difficulty: U256::from(poc_types::constants::POC_MIN_LIMIT),
            number,
            gas_limit: 8_000_000,
            gas_used: 0,
            timestamp,
            extra_data: Bytes::new(),
            mix_hash: H256::zero(),
            nonce: Default::default(),
            base_fee_per_gas: None,
            pid: Pid::zero(),
            k: 1,
            challenge: H256::zero(),
            proof: Bytes::new(),
            signed: poc_types::Signature([0u8; 65]),
            net_capacity: 0,
        }
    }

    #[test]
    fn preserves_result_order() {
        let parent = header_at(9, 1_000);
        let mut headers = Vec::new();
        for i in 0..4u64 {
            let mut h = header_at(10 + i, 1_000 + 3 * (i + 1));
            h.difficulty =
                crate::difficulty::calc_difficulty(parent.timestamp, h.timestamp, parent.difficulty);
            headers.push(h);
        }
        let params = ValidationParams { is_uncle: false, check_seal: false, unix_now: u64::MAX, london_active: false };
        let batch: Vec<BatchItem<'_>> = headers
            .iter()
            .map(|h| BatchItem { header: h, parent: &parent, parent_hash: H256::zero(), params })
            .collect();
        let abort = AbortSignal::new();
        let results = validate_batch::<DefaultCrypto, AlwaysValid>(&batch, &AlwaysValid, &abort);
        assert_eq!(results.len(), 4);
        // only the first header actually has number == parent.number + 1; rest fail rule 8, but
        // every index must still report *some* result, in order.
        assert!(results[0].as_ref().unwrap().is_ok());
        for result in &results[1..] {
            assert!(result.as_ref().unwrap().is_err());
        }
    }

    #[test]
    fn aborted_before_dispatch_yields_none() {
        let parent = header_at(9, 1_000);
        let header = header_at(10, 1_003);
        let params = ValidationParams { is_uncle: false, check_seal: false, unix_now: u64::MAX, london_active: false };
        let batch =
            vec![BatchItem { header: &header, parent: &parent, parent_hash: H256::zero(), params }];
        let abort = AbortSignal::new();
        abort.abort();
        let results = validate_batch::<DefaultCrypto, AlwaysValid>(&batch, &AlwaysValid, &abort);
        assert!(results[0].is_none());
    }
}
