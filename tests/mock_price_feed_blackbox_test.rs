// Blackbox tests for the mock price feed used on local and test chains.

use multiversx_sc_scenario::imports::*;

use fund_me::price_feed_proxy;

const PRICE_FEED_CODE_PATH: MxscPath =
    MxscPath::new("mock-price-feed/output/mock-price-feed.mxsc.json");

const OWNER: TestAddress = TestAddress::new("owner");
const PRICE_FEED_ADDRESS: TestSCAddress = TestSCAddress::new("price-feed");

const ERR_NO_DATA: &str = "No data present";

const FEED_DECIMALS: u8 = 8;
const INITIAL_ANSWER: u64 = 150_000_000_000;
const SECOND_ANSWER: u64 = 180_000_000_000;

const DEPLOY_TIMESTAMP: u64 = 1_000;
const UPDATE_TIMESTAMP: u64 = 1_600;

fn world() -> ScenarioWorld {
    let mut blockchain = ScenarioWorld::new();

    blockchain.register_contract(PRICE_FEED_CODE_PATH, mock_price_feed::ContractBuilder);
    blockchain
}

struct PriceFeedTestState {
    world: ScenarioWorld,
}

impl PriceFeedTestState {
    fn new() -> Self {
        let mut world = world();

        world.account(OWNER).nonce(1);
        world.current_block().block_timestamp(DEPLOY_TIMESTAMP);

        world
            .tx()
            .from(OWNER)
            .typed(price_feed_proxy::PriceFeedProxy)
            .init(FEED_DECIMALS, INITIAL_ANSWER)
            .code(PRICE_FEED_CODE_PATH)
            .new_address(PRICE_FEED_ADDRESS)
            .run();

        Self { world }
    }

    fn update_answer(&mut self, answer: u64, timestamp: u64) {
        self.world.current_block().block_timestamp(timestamp);
        self.world
            .tx()
            .from(OWNER)
            .to(PRICE_FEED_ADDRESS)
            .typed(price_feed_proxy::PriceFeedProxy)
            .update_answer(answer)
            .run();
    }

    fn round_data(&mut self, round_id: u64) -> (u64, BigUint<StaticApi>, u64, u64, u64) {
        self.world
            .query()
            .to(PRICE_FEED_ADDRESS)
            .typed(price_feed_proxy::PriceFeedProxy)
            .get_round_data(round_id)
            .returns(ReturnsResult)
            .run()
            .into_tuple()
    }

    fn latest_round_data(&mut self) -> (u64, BigUint<StaticApi>, u64, u64, u64) {
        self.world
            .query()
            .to(PRICE_FEED_ADDRESS)
            .typed(price_feed_proxy::PriceFeedProxy)
            .latest_round_data()
            .returns(ReturnsResult)
            .run()
            .into_tuple()
    }

    fn check_latest_answer(&mut self, expected: u64) {
        self.world
            .query()
            .to(PRICE_FEED_ADDRESS)
            .typed(price_feed_proxy::PriceFeedProxy)
            .latest_answer()
            .returns(ExpectValue(expected))
            .run();
    }

    fn check_round_missing(&mut self, round_id: u64) {
        self.world
            .tx()
            .from(OWNER)
            .to(PRICE_FEED_ADDRESS)
            .typed(price_feed_proxy::PriceFeedProxy)
            .get_round_data(round_id)
            .returns(ExpectError(4, ERR_NO_DATA))
            .run();
    }
}

#[test]
fn init_opens_first_round() {
    let mut state = PriceFeedTestState::new();

    state
        .world
        .query()
        .to(PRICE_FEED_ADDRESS)
        .typed(price_feed_proxy::PriceFeedProxy)
        .decimals()
        .returns(ExpectValue(FEED_DECIMALS))
        .run();

    let (round_id, answer, started_at, updated_at, answered_in_round) =
        state.latest_round_data();
    assert_eq!(round_id, 1);
    assert_eq!(answer, BigUint::from(INITIAL_ANSWER));
    assert_eq!(started_at, DEPLOY_TIMESTAMP);
    assert_eq!(updated_at, DEPLOY_TIMESTAMP);
    assert_eq!(answered_in_round, 1);

    state.check_latest_answer(INITIAL_ANSWER);
}

#[test]
fn update_answer_bumps_round_and_keeps_history() {
    let mut state = PriceFeedTestState::new();

    state.update_answer(SECOND_ANSWER, UPDATE_TIMESTAMP);

    let (round_id, answer, _, updated_at, _) = state.latest_round_data();
    assert_eq!(round_id, 2);
    assert_eq!(answer, BigUint::from(SECOND_ANSWER));
    assert_eq!(updated_at, UPDATE_TIMESTAMP);
    state.check_latest_answer(SECOND_ANSWER);

    let (first_id, first_answer, _, first_updated_at, _) = state.round_data(1);
    assert_eq!(first_id, 1);
    assert_eq!(first_answer, BigUint::from(INITIAL_ANSWER));
    assert_eq!(first_updated_at, DEPLOY_TIMESTAMP);
}

#[test]
fn get_round_data_rejects_unknown_rounds() {
    let mut state = PriceFeedTestState::new();

    state.check_round_missing(0);
    state.check_round_missing(2);

    state.update_answer(SECOND_ANSWER, UPDATE_TIMESTAMP);
    state.round_data(2);
    state.check_round_missing(3);
}
