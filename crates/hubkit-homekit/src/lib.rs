pub mod characteristics;
pub mod connection;
pub mod error;
pub mod model;
pub mod television;

pub use characteristics::{
    clamp_enum_to_char, CharacteristicEnum, CurrentMediaState, RemoteKey, TargetMediaState,
};
pub use connection::AccessoryConnection;
pub use error::HomeKitError;
pub use model::{Accessory, Characteristic, CharacteristicWrite, Service};
pub use television::{
    discover_televisions, MediaPlayerState, Television, DEVICE_CLASS_TV, SUPPORT_PAUSE,
    SUPPORT_PLAY, SUPPORT_STOP,
};
