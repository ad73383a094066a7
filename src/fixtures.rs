#[cfg(test)]
pub mod test {
    use std::time::Duration;

    use crate::{Configurable, Field, FieldMeta};

    #[derive(Configurable, Debug, Default, PartialEq)]
    pub struct ServeConfig {
        #[flag(name = "addr", value = ":8000", usage = "Listen and serve address")]
        pub addr: String,

        #[flag(
            name = "databaseUrl",
            value = "mongodb://localhost:27017/db",
            usage = "Database connection url"
        )]
        pub database_url: String,

        #[flag(name = "timeout", value = "200ms", usage = "Timeout value")]
        pub timeout: Duration,

        #[flag(name = "optional")]
        pub optional: String,

        #[flag(name = "apiKey", env_var = "API_KEY", usage = "API key")]
        pub api_key: String,

        #[flag(name = "batchSize", env_var = "BATCH_SIZE", usage = "Batch size for query")]
        pub batch_size: i32,

        #[flag(name = "maxCount")]
        pub max_count: i64,

        #[flag(name = "debug", env_var = "DEBUG")]
        pub debug: bool,

        #[flag(name = "profit", value = "500")]
        pub profit: u32,

        #[flag(name = "nonProfit")]
        pub non_profit: u32,

        #[flag(name = "megaProfit")]
        pub mega_profit: u64,
    }

    #[test]
    fn serve_config_enumerates_every_field() {
        let mut config = ServeConfig::default();
        assert_eq!(config.fields().len(), 11);
    }

    // -- Fixtures with malformed declared defaults -----------------------------

    #[derive(Configurable, Default)]
    pub struct BadBoolConfig {
        #[flag(name = "debug", value = "foo")]
        pub debug: bool,
    }

    #[derive(Configurable, Default)]
    pub struct BadInt32Config {
        #[flag(name = "size", value = "abc")]
        pub size: i32,
    }

    #[derive(Configurable, Default)]
    pub struct BadInt64Config {
        #[flag(name = "size64", value = "abc")]
        pub size64: i64,
    }

    #[derive(Configurable, Default)]
    pub struct BadDurationConfig {
        #[flag(name = "timeout", value = "bad")]
        pub timeout: Duration,
    }

    /// The middle field fails when `SIZE` holds a non-integer.
    #[derive(Configurable, Default)]
    pub struct EnvSizeConfig {
        #[flag(name = "name", value = "worker")]
        pub name: String,

        #[flag(name = "size", env_var = "SIZE")]
        pub size: i32,

        #[flag(name = "after", value = "9")]
        pub after: i32,
    }

    // -- Fixture with a hand-written impl --------------------------------------

    #[derive(Debug, Default)]
    pub struct HandWrittenConfig {
        pub retries: i32,
        pub grace: Duration,
        pub hidden: String,
    }

    impl Configurable for HandWrittenConfig {
        fn fields(&mut self) -> Vec<Field<'_>> {
            vec![
                Field::new(FieldMeta::new("retries").value("3"), &mut self.retries),
                Field::new(FieldMeta::new("grace").value("10s"), &mut self.grace),
                Field::new(FieldMeta::new("").value("internal"), &mut self.hidden),
            ]
        }
    }
}
