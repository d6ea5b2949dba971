//! Media player binding for HomeKit television services.

use crate::characteristics::{
    clamp_enum_to_char, CharacteristicEnum, CurrentMediaState, RemoteKey, TargetMediaState,
    CURRENT_MEDIA_STATE, REMOTE_KEY, TARGET_MEDIA_STATE,
};
use crate::connection::AccessoryConnection;
use crate::error::HomeKitError;
use crate::model::{Accessory, CharacteristicWrite, Service};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;

pub const SUPPORT_PAUSE: u32 = 1;
pub const SUPPORT_STOP: u32 = 4096;
pub const SUPPORT_PLAY: u32 = 16384;

pub const DEVICE_CLASS_TV: &str = "tv";

pub const TELEVISION_SERVICE: &str = "television";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaPlayerState {
    Playing,
    Paused,
    Idle,
}

impl MediaPlayerState {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaPlayerState::Playing => "playing",
            MediaPlayerState::Paused => "paused",
            MediaPlayerState::Idle => "idle",
        }
    }
}

impl fmt::Display for MediaPlayerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<CurrentMediaState> for MediaPlayerState {
    fn from(state: CurrentMediaState) -> Self {
        match state {
            CurrentMediaState::Playing => MediaPlayerState::Playing,
            CurrentMediaState::Paused => MediaPlayerState::Paused,
            CurrentMediaState::Stopped => MediaPlayerState::Idle,
        }
    }
}

/// A television service on a paired accessory, keyed by `(aid, iid)`.
pub struct Television {
    aid: u64,
    iid: u64,
    /// Characteristic short type -> iid.
    chars: HashMap<&'static str, u64>,
    current_media_state: Option<u8>,
    supported_target_media_state: BTreeSet<TargetMediaState>,
    supported_remote_key: BTreeSet<RemoteKey>,
    features: u32,
    connection: Arc<dyn AccessoryConnection>,
}

impl Television {
    pub fn new(aid: u64, service: &Service, connection: Arc<dyn AccessoryConnection>) -> Self {
        let mut tv = Self {
            aid,
            iid: service.iid,
            chars: HashMap::new(),
            current_media_state: None,
            supported_target_media_state: BTreeSet::new(),
            supported_remote_key: BTreeSet::new(),
            features: 0,
            connection,
        };

        for short_type in [CURRENT_MEDIA_STATE, TARGET_MEDIA_STATE, REMOTE_KEY] {
            let Some(characteristic) = service.characteristic(short_type) else {
                continue;
            };
            tv.chars.insert(short_type, characteristic.iid);

            match short_type {
                TARGET_MEDIA_STATE => {
                    tv.supported_target_media_state = clamp_enum_to_char(characteristic);
                    for (target, feature) in [
                        (TargetMediaState::Pause, SUPPORT_PAUSE),
                        (TargetMediaState::Play, SUPPORT_PLAY),
                        (TargetMediaState::Stop, SUPPORT_STOP),
                    ] {
                        if tv.supported_target_media_state.contains(&target) {
                            tv.features |= feature;
                        }
                    }
                }
                REMOTE_KEY => {
                    tv.supported_remote_key = clamp_enum_to_char(characteristic);
                    if tv.supported_remote_key.contains(&RemoteKey::PlayPause) {
                        tv.features |= SUPPORT_PAUSE | SUPPORT_PLAY;
                    }
                }
                _ => {}
            }
        }

        tv.update_from_service(service);
        tv
    }

    pub fn key(&self) -> (u64, u64) {
        (self.aid, self.iid)
    }

    pub fn device_class(&self) -> &'static str {
        DEVICE_CLASS_TV
    }

    pub fn supported_features(&self) -> u32 {
        self.features
    }

    /// `None` when the current media state is absent or not a known value.
    pub fn state(&self) -> Option<MediaPlayerState> {
        self.current_media_state
            .and_then(CurrentMediaState::from_value)
            .map(MediaPlayerState::from)
    }

    /// Refresh polled values from a newer copy of the accessory.
    pub fn update(&mut self, accessory: &Accessory) {
        if accessory.aid != self.aid {
            return;
        }
        if let Some(service) = accessory.service(self.iid) {
            self.update_from_service(service);
        }
    }

    fn update_from_service(&mut self, service: &Service) {
        self.current_media_state = service
            .characteristic(CURRENT_MEDIA_STATE)
            .and_then(|c| c.value_u8());
    }

    pub async fn media_play(&self) -> Result<(), HomeKitError> {
        if self.state() == Some(MediaPlayerState::Playing) {
            tracing::debug!("Cannot play while already playing");
            return Ok(());
        }
        self.send_target_or_play_pause(TargetMediaState::Play).await
    }

    pub async fn media_pause(&self) -> Result<(), HomeKitError> {
        if self.state() == Some(MediaPlayerState::Paused) {
            tracing::debug!("Cannot pause while already paused");
            return Ok(());
        }
        self.send_target_or_play_pause(TargetMediaState::Pause).await
    }

    pub async fn media_stop(&self) -> Result<(), HomeKitError> {
        if self.state() == Some(MediaPlayerState::Idle) {
            tracing::debug!("Cannot stop when already idle");
            return Ok(());
        }
        if self.supported_target_media_state.contains(&TargetMediaState::Stop) {
            self.put(TARGET_MEDIA_STATE, TargetMediaState::Stop.value())
                .await?;
        }
        Ok(())
    }

    async fn send_target_or_play_pause(&self, target: TargetMediaState) -> Result<(), HomeKitError> {
        if self.supported_target_media_state.contains(&target) {
            self.put(TARGET_MEDIA_STATE, target.value()).await
        } else if self.supported_remote_key.contains(&RemoteKey::PlayPause) {
            self.put(REMOTE_KEY, RemoteKey::PlayPause.value()).await
        } else {
            tracing::debug!(aid = self.aid, iid = self.iid, ?target, "no way to send command");
            Ok(())
        }
    }

    async fn put(&self, short_type: &'static str, value: u8) -> Result<(), HomeKitError> {
        let Some(&iid) = self.chars.get(short_type) else {
            return Ok(());
        };
        let write = CharacteristicWrite {
            aid: self.aid,
            iid,
            value: serde_json::Value::from(value),
        };
        tracing::debug!(aid = self.aid, iid, value, characteristic = short_type, "writing characteristic");
        self.connection.put_characteristics(&[write]).await
    }
}

impl fmt::Debug for Television {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Television")
            .field("aid", &self.aid)
            .field("iid", &self.iid)
            .field("state", &self.state())
            .field("features", &self.features)
            .finish()
    }
}

/// Create a [`Television`] for every television service across `accessories`.
pub fn discover_televisions(
    accessories: &[Accessory],
    connection: Arc<dyn AccessoryConnection>,
) -> Vec<Television> {
    let mut televisions = Vec::new();
    for accessory in accessories {
        for service in &accessory.services {
            if service.short_type() != TELEVISION_SERVICE {
                continue;
            }
            tracing::debug!(aid = accessory.aid, iid = service.iid, "discovered television");
            televisions.push(Television::new(accessory.aid, service, connection.clone()));
        }
    }
    televisions
}
