pub mod config;

pub mod domain {
    pub mod catalog;
    pub mod error;
    pub mod repository;

    pub mod model {
        pub mod record;
    }
}

pub mod application {
    pub mod error;
    pub mod report;
    pub mod search;
    pub mod service;
}

pub mod infra {
    pub mod json_store;
    pub mod open_library;
}

pub mod interface {
    pub mod menu;
}
