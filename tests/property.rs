mod property {
    pub mod strategies;
    mod copy;
    mod materialize;
    mod roundtrip;
}
