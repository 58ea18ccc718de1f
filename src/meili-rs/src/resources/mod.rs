//! Resource facades.
//!
//! One facade per API resource family. Each method builds a
//! [`Request`](crate::Request) and hands it to the client's dispatcher;
//! facades hold no state beyond a client reference and, for index-scoped
//! resources, the index uid.
//!
//! | Facade | Obtained with |
//! |--------|---------------|
//! | [`Indexes`] | [`Client::indexes`](crate::Client::indexes) |
//! | [`Documents`] | [`Client::documents`](crate::Client::documents) |
//! | [`Search`] | [`Client::search`](crate::Client::search) |
//! | [`SettingsApi`] | [`Client::settings`](crate::Client::settings) |
//! | [`Updates`] | [`Client::updates`](crate::Client::updates) |
//! | [`KeysApi`], [`StatsApi`], [`HealthApi`], [`VersionApi`] | the matching `Client` accessor |

mod documents;
mod indexes;
mod instance;
mod search;
mod settings;
mod updates;

pub use documents::Documents;
pub use indexes::Indexes;
pub use instance::{HealthApi, KeysApi, StatsApi, VersionApi};
pub use search::Search;
pub use settings::SettingsApi;
pub use updates::Updates;
