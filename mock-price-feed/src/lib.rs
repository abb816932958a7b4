#![no_std]

multiversx_sc::imports!();

// ============================================================
// Mock price feed
// Aggregator-shaped EGLD/USD feed with a settable answer, used
// in place of a live oracle on local and test chains.
// ============================================================

#[multiversx_sc::contract]
pub trait MockPriceFeed {
    #[init]
    fn init(&self, decimals: u8, initial_answer: BigUint) {
        self.feed_decimals().set(decimals);
        self.update_answer(initial_answer);
    }

    #[upgrade]
    fn upgrade(&self) {}

    // ========================================================
    // ENDPOINT: updateAnswer
    // Opens a new round carrying `answer`.
    // ========================================================

    #[endpoint(updateAnswer)]
    fn update_answer(&self, answer: BigUint) {
        let round_id = self.latest_round().get() + 1;
        let timestamp = self.blockchain().get_block_timestamp();

        self.latest_round().set(round_id);
        self.answers(round_id).set(&answer);
        self.updated_at(round_id).set(timestamp);

        self.answer_updated_event(round_id, &answer, timestamp);
    }

    // ========================================================
    // VIEWS
    // ========================================================

    /// (round_id, answer, started_at, updated_at, answered_in_round)
    #[view(latestRoundData)]
    fn latest_round_data(&self) -> MultiValue5<u64, BigUint, u64, u64, u64> {
        self.get_round_data(self.latest_round().get())
    }

    #[view(getRoundData)]
    fn get_round_data(&self, round_id: u64) -> MultiValue5<u64, BigUint, u64, u64, u64> {
        require!(
            round_id > 0 && round_id <= self.latest_round().get(),
            "No data present"
        );
        let answer = self.answers(round_id).get();
        let timestamp = self.updated_at(round_id).get();
        (round_id, answer, timestamp, timestamp, round_id).into()
    }

    #[view(latestAnswer)]
    fn latest_answer(&self) -> BigUint {
        self.answers(self.latest_round().get()).get()
    }

    #[view(decimals)]
    fn decimals(&self) -> u8 {
        self.feed_decimals().get()
    }

    // ========================================================
    // EVENTS
    // ========================================================

    #[event("answerUpdated")]
    fn answer_updated_event(
        &self,
        #[indexed] round_id: u64,
        #[indexed] answer: &BigUint,
        updated_at: u64,
    );

    // ========================================================
    // STORAGE
    // ========================================================

    #[storage_mapper("decimals")]
    fn feed_decimals(&self) -> SingleValueMapper<u8>;

    #[storage_mapper("latestRound")]
    fn latest_round(&self) -> SingleValueMapper<u64>;

    #[storage_mapper("answers")]
    fn answers(&self, round_id: u64) -> SingleValueMapper<BigUint>;

    #[storage_mapper("updatedAt")]
    fn updated_at(&self, round_id: u64) -> SingleValueMapper<u64>;
}
