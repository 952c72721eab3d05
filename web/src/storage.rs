use gloo::storage::{LocalStorage, Storage};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tictactoe_core::{ScoreStore, Scores};

pub(crate) trait StorageKey {
    const KEY: &'static str;
}

/// LocalStorage access for anything with a [`StorageKey`].
pub(crate) trait LocalPersist: StorageKey + Serialize + DeserializeOwned {
    fn local_load() -> Option<Self> {
        LocalStorage::get(Self::KEY)
            .inspect_err(|err| log::debug!("nothing usable under {:?}: {:?}", Self::KEY, err))
            .ok()
    }

    fn local_save(&self) {
        if let Err(err) = LocalStorage::set(Self::KEY, self) {
            log::error!("Could not save {:?} to local storage: {:?}", Self::KEY, err);
        }
    }

    fn local_delete() {
        LocalStorage::delete(Self::KEY);
    }
}

impl<T: StorageKey + Serialize + DeserializeOwned> LocalPersist for T {}

impl StorageKey for Scores {
    const KEY: &'static str = "scores";
}

/// Keeps the running scores in the browser's LocalStorage.
#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct LocalScoreStore;

impl ScoreStore for LocalScoreStore {
    fn load(&self) -> Option<Scores> {
        Scores::local_load()
    }

    fn save(&mut self, scores: &Scores) {
        scores.local_save();
    }

    fn clear(&mut self) {
        Scores::local_delete();
    }
}
