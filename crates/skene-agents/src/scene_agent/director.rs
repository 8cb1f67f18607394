// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! High-level sequencing over a configured list of scene sets.

use super::bootstrapper::SceneBootstrapper;
use skene_core::error::SceneError;
use skene_core::event::StageEvent;
use skene_core::stage::{LoadOptions, SceneSet, SceneSetManifest};

/// One configured entry in the director's sequence: a set and the options
/// it is normally loaded with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneSetEntry {
    /// The authored set.
    pub set: SceneSet,
    /// The retention policy used when this entry is requested.
    pub options: LoadOptions,
}

impl From<SceneSetManifest> for SceneSetEntry {
    fn from(manifest: SceneSetManifest) -> Self {
        Self {
            set: manifest.set,
            options: manifest.options,
        }
    }
}

/// Drives the title/next/reload flow over an ordered list of scene sets.
///
/// The director owns its bootstrapper and is handed its event sender at
/// construction; nothing here is looked up through an ambient registry.
/// Only sets present in the configured list can be requested.
pub struct SceneDirector {
    bootstrapper: SceneBootstrapper,
    entries: Vec<SceneSetEntry>,
    current: Option<usize>,
    loading: bool,
    events: flume::Sender<StageEvent>,
    completion_rx: Option<crossbeam_channel::Receiver<Result<(), SceneError>>>,
}

impl SceneDirector {
    /// Creates a director over the given sequence of entries. The first
    /// entry is treated as the title set.
    pub fn new(
        bootstrapper: SceneBootstrapper,
        entries: Vec<SceneSetEntry>,
        events: flume::Sender<StageEvent>,
    ) -> Self {
        Self {
            bootstrapper,
            entries,
            current: None,
            loading: false,
            events,
            completion_rx: None,
        }
    }

    /// Loads the title set (the first configured entry).
    pub fn load_title_set(&mut self) -> Result<(), SceneError> {
        self.load_entry(0, None)
    }

    /// Loads the configured set with the given name.
    pub fn load_set(&mut self, name: &str) -> Result<(), SceneError> {
        let index = self
            .entries
            .iter()
            .position(|entry| entry.set.name == name)
            .ok_or_else(|| SceneError::UnknownSet {
                name: name.to_string(),
            })?;
        self.load_entry(index, None)
    }

    /// Loads the entry after the current one, wrapping to the first entry
    /// at the end of the list.
    pub fn load_next_set(&mut self) -> Result<(), SceneError> {
        self.load_entry(self.next_index(), None)
    }

    /// Reloads the current entry, forcing matched scenes to be unloaded and
    /// loaded again.
    pub fn reload_current_set(&mut self) -> Result<(), SceneError> {
        let index = self.current.unwrap_or(0);
        self.load_entry(index, Some(LoadOptions::RELOAD_MATCHING))
    }

    /// Advances the bootstrapper and observes request completion.
    pub fn update(&mut self) {
        self.bootstrapper.update();
        self.poll_completion();
    }

    /// Whether a set load is currently in progress.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Normalized loading progress of the current request, in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        self.bootstrapper.progress()
    }

    /// The entry most recently requested, if any.
    pub fn current_set(&self) -> Option<&SceneSetEntry> {
        self.current.and_then(|index| self.entries.get(index))
    }

    /// The entry [`load_next_set`](Self::load_next_set) would request.
    pub fn next_set(&self) -> Option<&SceneSetEntry> {
        self.entries.get(self.next_index())
    }

    /// The configured sequence of entries.
    pub fn entries(&self) -> &[SceneSetEntry] {
        &self.entries
    }

    /// Read access to the owned bootstrapper.
    pub fn bootstrapper(&self) -> &SceneBootstrapper {
        &self.bootstrapper
    }

    fn next_index(&self) -> usize {
        match self.current {
            Some(index) if index + 1 < self.entries.len() => index + 1,
            _ => 0,
        }
    }

    fn load_entry(
        &mut self,
        index: usize,
        options_override: Option<LoadOptions>,
    ) -> Result<(), SceneError> {
        let Some(entry) = self.entries.get(index) else {
            return Err(SceneError::UnknownSet {
                name: format!("#{index}"),
            });
        };
        let set = entry.set.clone();
        let options = options_override.unwrap_or(entry.options);

        let (tx, rx) = crossbeam_channel::bounded(1);
        self.bootstrapper.load_scene_set(
            &set,
            options,
            Box::new(move |result| {
                let _ = tx.send(result);
            }),
        )?;

        log::info!("Loading scene set '{}'", set.name);
        self.current = Some(index);
        self.loading = true;
        self.completion_rx = Some(rx);
        self.publish(StageEvent::SetRequested {
            set_name: set.name.clone(),
        });

        // Zero-operation requests have already completed.
        self.poll_completion();
        Ok(())
    }

    fn poll_completion(&mut self) {
        let Some(rx) = &self.completion_rx else {
            return;
        };
        let Ok(result) = rx.try_recv() else {
            return;
        };

        self.completion_rx = None;
        self.loading = false;
        match result {
            Ok(()) => {
                if let Some(entry) = self.current.and_then(|index| self.entries.get(index)) {
                    let set_name = entry.set.name.clone();
                    log::info!("Scene set '{set_name}' loaded");
                    self.publish(StageEvent::SetLoaded { set_name });
                }
            }
            Err(error) => {
                log::warn!("Scene set load failed: {error}");
            }
        }
    }

    fn publish(&self, event: StageEvent) {
        if let Err(e) = self.events.send(event) {
            log::error!("Failed to publish stage event: {e}. Receiver likely disconnected.");
        }
    }
}
