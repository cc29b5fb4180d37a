//! Exercises the seam between `poc-consensus` and `poc-economy`: build a signed header, validate
//! it, then finalize a block against the same in-memory state.

use std::collections::BTreeMap;

use poc_consensus::{
    batch::{validate_batch, AbortSignal, BatchItem},
    difficulty::calc_difficulty,
    proof::ProofVerifier,
    validator::{validate_header, ValidationParams},
};
use poc_economy::reward::{finalize_block, FinalizeParams};
use poc_types::{
    account::{Account, StakingRecord},
    constants::POC_MIN_LIMIT,
    header::Pid,
    Address, Bytes, Crypto, DefaultCrypto, Header, Signature, StateView, H256, U256,
};

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

#[derive(Default)]
struct MemoryState {
    balances: BTreeMap<Address, U256>,
    accounts: BTreeMap<Address, Account>,
    staking: Vec<StakingRecord>,
}

impl StateView for MemoryState {
    fn balance(&self, address: Address) -> U256 {
        self.balances.get(&address).copied().unwrap_or_default()
    }

    fn add_balance(&mut self, address: Address, amount: U256) {
        *self.balances.entry(address).or_default() += amount;
    }

    fn sub_balance(&mut self, address: Address, amount: U256) {
        *self.balances.entry(address).or_default() -= amount;
    }

    fn account(&self, address: Address) -> Account {
        self.accounts.get(&address).cloned().unwrap_or_default()
    }

    fn set_account(&mut self, address: Address, account: Account) {
        self.accounts.insert(address, account);
    }

    fn staking_list(&self) -> Vec<StakingRecord> {
        self.staking.clone()
    }

    fn set_staking_list(&mut self, records: Vec<StakingRecord>) {
        self.staking = records;
    }

    fn intermediate_root(&mut self) -> H256 {
        H256::zero()
    }
}

fn bare_header(number: u64, timestamp: u64) -> Header {
    Header {
        parent_hash: H256::zero(),
        ommers_hash: H256::zero(),
        beneficiary: Address::zero(),
        state_root: H256::zero(),
        transactions_root: H256::zero(),
        receipts_root: H256::zero(),
        logs_bloom: Default::default(),
        difficulty: U256::from(POC_MIN_LIMIT),
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
        signed: Signature([0u8; 65]),
        net_capacity: 0,
    }
}

/// Builds a signed, chain-valid child header on top of `parent`, beneficiary derived from a
/// fixed test private key.
fn signed_child(parent: &Header, parent_hash: H256) -> (Header, Address) {
    let secret = libsecp256k1::SecretKey::parse(&[0x11; 32]).unwrap();
    let public = libsecp256k1::PublicKey::from_secret_key(&secret);
    let uncompressed = public.serialize();
    let beneficiary_hash = DefaultCrypto::keccak256(&uncompressed[1..]);
    let beneficiary = Address::from_slice(&beneficiary_hash.as_bytes()[12..32]);

    let mut header = bare_header(parent.number + 1, parent.timestamp + poc_types::constants::POC_SLOT);
    header.beneficiary = beneficiary;
    header.difficulty = calc_difficulty(parent.timestamp, header.timestamp, parent.difficulty);
    header.challenge = poc_consensus::challenge::calc_next_challenge::<DefaultCrypto>(parent, parent_hash);

    let message = header.signing_input::<DefaultCrypto>();
    let msg = libsecp256k1::Message::parse(&message);
    let (signature, recovery_id) = libsecp256k1::sign(&msg, &secret);
    let mut raw = [0u8; 65];
    raw[..64].copy_from_slice(&signature.serialize());
    raw[64] = recovery_id.serialize();
    header.signed = Signature(raw);

    (header, beneficiary)
}

#[test]
fn valid_header_validates_and_its_block_finalizes_a_reward() {
    let parent = bare_header(0, 1_000);
    let parent_hash = parent.compute_hash::<DefaultCrypto>();
    let (header, beneficiary) = signed_child(&parent, parent_hash);

    let params = ValidationParams { is_uncle: false, check_seal: true, unix_now: u64::MAX, london_active: false };
    validate_header::<DefaultCrypto, AlwaysValid>(&header, &parent, parent_hash, &AlwaysValid, params)
        .expect("header should satisfy every validation rule");

    let mut state = MemoryState::default();
    let outcome =
        finalize_block::<DefaultCrypto, _>(&mut state, FinalizeParams { number: header.number, coinbase: beneficiary });

    assert_eq!(state.balance(beneficiary), outcome.available + outcome.amount_unlocked);
    assert_eq!(state.account(beneficiary).funds.len(), 180);
}

#[test]
fn batch_validation_preserves_order_across_the_same_header() {
    let parent = bare_header(0, 1_000);
    let parent_hash = parent.compute_hash::<DefaultCrypto>();
    let (header, _beneficiary) = signed_child(&parent, parent_hash);

    let params = ValidationParams { is_uncle: false, check_seal: true, unix_now: u64::MAX, london_active: false };
    let batch = vec![BatchItem { header: &header, parent: &parent, parent_hash, params }];
    let abort = AbortSignal::new();
    let results = validate_batch::<DefaultCrypto, AlwaysValid>(&batch, &AlwaysValid, &abort);

    assert_eq!(results.len(), 1);
    assert!(results[0].as_ref().unwrap().is_ok());
}
