use crate::error::HomeKitError;
use crate::model::CharacteristicWrite;
use async_trait::async_trait;

/// A paired accessory that characteristic writes are sent to.
#[async_trait]
pub trait AccessoryConnection: Send + Sync {
    async fn put_characteristics(&self, writes: &[CharacteristicWrite]) -> Result<(), HomeKitError>;
}
