#![no_std]

multiversx_sc::imports!();

pub mod errors;
pub mod fund_me_proxy;
pub mod price_converter;
pub mod price_feed_proxy;
pub mod types;

use errors::{ERR_INDEX_OUT_OF_RANGE, ERR_INSUFFICIENT_CONTRIBUTION, ERR_NOT_OWNER};
use types::FunderScan;

// ============================================================
// Constants
// ============================================================

/// Minimum contribution in whole USD, checked at the feed's current price
const MINIMUM_USD: u64 = 50;

// ============================================================
// Contract
// ============================================================

#[multiversx_sc::contract]
pub trait FundMe {
    // ========================================================
    // Init / Upgrade
    // ========================================================

    #[init]
    fn init(&self, price_feed_address: ManagedAddress) {
        let deployer = self.blockchain().get_caller();
        self.owner().set(&deployer);
        self.price_feed().set(&price_feed_address);
    }

    /// Owner and price feed are fixed at deploy time and survive upgrades.
    #[upgrade]
    fn upgrade(&self) {}

    // ========================================================
    // ENDPOINT: fund
    // Accepts EGLD worth at least MINIMUM_USD at the feed price.
    // ========================================================

    #[endpoint(fund)]
    #[payable("EGLD")]
    fn fund(&self) {
        let caller = self.blockchain().get_caller();
        let payment_amount = self.call_value().egld_value().clone_value();

        // Oracle read happens before any storage write
        let usd_value = self.egld_to_usd(&payment_amount);
        require!(
            usd_value >= self.get_minimum_usd(),
            ERR_INSUFFICIENT_CONTRIBUTION
        );

        self.address_to_amount_funded(&caller)
            .update(|funded| *funded += &payment_amount);
        self.funders().push(&caller);

        self.fund_event(&caller, &payment_amount, &usd_value);
    }

    // ========================================================
    // ENDPOINT: withdraw / cheaperWithdraw
    // Owner drains the whole balance and a new round starts.
    // ========================================================

    #[endpoint(withdraw)]
    fn withdraw(&self) {
        self.drain(FunderScan::Storage);
    }

    #[endpoint(cheaperWithdraw)]
    fn cheaper_withdraw(&self) {
        self.drain(FunderScan::Cached);
    }

    // ========================================================
    // INTERNAL: drain
    // Checks, then every storage effect, then the transfer.
    // A reentrant call finds an empty ledger.
    // ========================================================

    fn drain(&self, scan: FunderScan) {
        let caller = self.blockchain().get_caller();
        self.require_owner(&caller);

        let funder_count = match scan {
            FunderScan::Storage => self.reset_funders_from_storage(),
            FunderScan::Cached => self.reset_funders_from_local_copy(),
        };
        self.funders().clear();

        let balance = self
            .blockchain()
            .get_sc_balance(&EgldOrEsdtTokenIdentifier::egld(), 0);
        self.withdraw_event(&caller, &balance, funder_count);

        if balance > 0u64 {
            self.send().direct_egld(&caller, &balance);
        }
    }

    fn require_owner(&self, caller: &ManagedAddress) {
        require!(*caller == self.owner().get(), ERR_NOT_OWNER);
    }

    /// Length and elements are read from storage on every iteration.
    fn reset_funders_from_storage(&self) -> u64 {
        let mut index = 1usize;
        while index <= self.funders().len() {
            let funder = self.funders().get(index);
            self.address_to_amount_funded(&funder).clear();
            index += 1;
        }
        (index - 1) as u64
    }

    /// One pass over storage to build the local copy, then no more list reads.
    fn reset_funders_from_local_copy(&self) -> u64 {
        let mut funders: ManagedVec<ManagedAddress> = ManagedVec::new();
        for funder in self.funders().iter() {
            funders.push(funder);
        }

        for funder in funders.iter() {
            // Duplicate entries clear an already-empty record
            self.address_to_amount_funded(&funder).clear();
        }
        funders.len() as u64
    }

    // ========================================================
    // INTERNAL: price feed
    // ========================================================

    fn latest_price(&self) -> (BigUint, u32) {
        let price_feed_address = self.price_feed().get();

        let round_data: MultiValue5<u64, BigUint, u64, u64, u64> = self
            .tx()
            .to(&price_feed_address)
            .typed(price_feed_proxy::PriceFeedProxy)
            .latest_round_data()
            .returns(ReturnsResult)
            .sync_call();
        let (_round_id, answer, _started_at, _updated_at, _answered_in_round) =
            round_data.into_tuple();

        let decimals: u8 = self
            .tx()
            .to(&price_feed_address)
            .typed(price_feed_proxy::PriceFeedProxy)
            .decimals()
            .returns(ReturnsResult)
            .sync_call();

        (answer, decimals as u32)
    }

    fn egld_to_usd(&self, egld_amount: &BigUint) -> BigUint {
        let (rate, rate_decimals) = self.latest_price();
        price_converter::egld_to_usd(egld_amount, &rate, rate_decimals)
    }

    // ========================================================
    // VIEWS — read-only queries
    // ========================================================

    #[view(getBalance)]
    fn get_balance(&self) -> BigUint {
        self.blockchain()
            .get_sc_balance(&EgldOrEsdtTokenIdentifier::egld(), 0)
    }

    #[view(getAddressToAmountFunded)]
    fn get_address_to_amount_funded(&self, funder: &ManagedAddress) -> BigUint {
        self.address_to_amount_funded(funder).get()
    }

    /// Zero-based position in the current round's funder list.
    #[view(getFunder)]
    fn get_funder(&self, index: u64) -> ManagedAddress {
        require!(
            index < self.funders().len() as u64,
            ERR_INDEX_OUT_OF_RANGE
        );
        self.funders().get(index as usize + 1)
    }

    #[view(getFundersCount)]
    fn get_funders_count(&self) -> u64 {
        self.funders().len() as u64
    }

    #[view(getPriceFeed)]
    fn get_price_feed(&self) -> ManagedAddress {
        self.price_feed().get()
    }

    #[view(getOwner)]
    fn get_owner(&self) -> ManagedAddress {
        self.owner().get()
    }

    #[view(getMinimumUsd)]
    fn get_minimum_usd(&self) -> BigUint {
        price_converter::usd(MINIMUM_USD)
    }

    #[view(getConversionRate)]
    fn get_conversion_rate(&self, egld_amount: BigUint) -> BigUint {
        self.egld_to_usd(&egld_amount)
    }

    // ========================================================
    // EVENTS
    // ========================================================

    #[event("fund")]
    fn fund_event(
        &self,
        #[indexed] funder: &ManagedAddress,
        #[indexed] amount: &BigUint,
        usd_value: &BigUint,
    );

    #[event("withdraw")]
    fn withdraw_event(
        &self,
        #[indexed] owner: &ManagedAddress,
        #[indexed] amount: &BigUint,
        funder_count: u64,
    );

    // ========================================================
    // STORAGE
    // ========================================================

    // ── Configuration ──

    #[storage_mapper("owner")]
    fn owner(&self) -> SingleValueMapper<ManagedAddress>;

    #[storage_mapper("priceFeed")]
    fn price_feed(&self) -> SingleValueMapper<ManagedAddress>;

    // ── Funding round ──

    #[storage_mapper("addressToAmountFunded")]
    fn address_to_amount_funded(&self, funder: &ManagedAddress) -> SingleValueMapper<BigUint>;

    #[storage_mapper("funders")]
    fn funders(&self) -> VecMapper<ManagedAddress>;
}
