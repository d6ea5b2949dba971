pub mod config;
pub mod dashboard;
pub mod error;
pub mod lovelace;
pub mod panels;
pub mod resources;
pub mod slug;
pub mod view;

pub use config::{LovelaceConfig, Mode, ResourceConfig, ResourceType, Sidebar, YamlDashboardConfig};
pub use dashboard::{
    ChangeType, Dashboard, DashboardCreate, DashboardInfo, DashboardItem, DashboardUpdate, InfoMode,
    DEFAULT_YAML_FILENAME,
};
pub use error::{LovelaceError, PanelError};
pub use lovelace::{Lovelace, SetupOptions, SharedLovelace, DOMAIN};
pub use panels::{Panel, PanelRegistration, PanelRegistry};
pub use resources::{ResourceCollection, ResourceCreate, ResourceItem, ResourceUpdate};
pub use slug::{slugify, url_slug};
pub use view::router;
