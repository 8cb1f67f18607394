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

use anyhow::Result;
use approx::assert_relative_eq;
use skene_agents::scene_agent::{SceneBootstrapper, SceneDirector, SceneReconciler, SceneSetEntry};
use skene_core::error::SceneError;
use skene_core::event::{EventBus, StageEvent};
use skene_core::stage::{LoadOptions, SceneDescriptor, SceneSet};
use skene_infra::host::LocalSceneHost;
use std::sync::Arc;

fn scene(name: &str) -> SceneDescriptor {
    SceneDescriptor::new(name, format!("scenes/{name}.ron"))
}

fn entry(name: &str, scenes: &[&str], options: LoadOptions) -> SceneSetEntry {
    SceneSetEntry {
        set: SceneSet::new(name, scenes.iter().map(|n| scene(n)).collect()),
        options,
    }
}

fn director_over(
    step: f32,
    entries: Vec<SceneSetEntry>,
) -> (Arc<LocalSceneHost>, EventBus<StageEvent>, SceneDirector) {
    skene_infra::logging::init_test_logging();
    let host = Arc::new(LocalSceneHost::new(step));
    let bootstrapper = SceneBootstrapper::new(SceneReconciler::new(host.clone()));
    let bus = EventBus::new();
    let director = SceneDirector::new(bootstrapper, entries, bus.sender());
    (host, bus, director)
}

fn drive(host: &LocalSceneHost, director: &mut SceneDirector, max_ticks: usize) -> bool {
    for _ in 0..max_ticks {
        if !director.is_loading() {
            return true;
        }
        host.pump();
        director.update();
    }
    !director.is_loading()
}

#[test]
fn title_then_next_wraps_around() -> Result<()> {
    let (host, _bus, mut director) = director_over(
        0.5,
        vec![
            entry("title", &["menu"], LoadOptions::CLEAR_EXISTING),
            entry("arena", &["arena_floor", "arena_hud"], LoadOptions::CLEAR_EXISTING),
        ],
    );

    director.load_title_set()?;
    assert!(drive(&host, &mut director, 50));
    assert_eq!(director.current_set().map(|e| e.set.name.as_str()), Some("title"));

    director.load_next_set()?;
    assert!(drive(&host, &mut director, 50));
    assert_eq!(director.current_set().map(|e| e.set.name.as_str()), Some("arena"));

    // Past the last entry the sequence wraps back to the title.
    assert_eq!(director.next_set().map(|e| e.set.name.as_str()), Some("title"));
    director.load_next_set()?;
    assert!(drive(&host, &mut director, 50));
    assert_eq!(director.current_set().map(|e| e.set.name.as_str()), Some("title"));
    Ok(())
}

#[test]
fn only_registered_sets_can_be_requested() {
    let (_host, _bus, mut director) = director_over(
        0.5,
        vec![entry("title", &["menu"], LoadOptions::NONE)],
    );

    let result = director.load_set("does-not-exist");
    assert_eq!(
        result,
        Err(SceneError::UnknownSet {
            name: "does-not-exist".to_string()
        })
    );
    assert!(!director.is_loading());
}

#[test]
fn set_lifecycle_events_are_published_in_order() -> Result<()> {
    let (host, bus, mut director) = director_over(
        0.5,
        vec![entry("title", &["menu"], LoadOptions::NONE)],
    );

    director.load_title_set()?;
    assert!(drive(&host, &mut director, 50));

    assert_eq!(
        bus.try_next(),
        Some(StageEvent::SetRequested {
            set_name: "title".to_string()
        })
    );
    assert_eq!(
        bus.try_next(),
        Some(StageEvent::SetLoaded {
            set_name: "title".to_string()
        })
    );
    assert_eq!(bus.try_next(), None);
    Ok(())
}

#[test]
fn reload_current_forces_matching_scenes_through() -> Result<()> {
    let (host, _bus, mut director) = director_over(
        0.5,
        vec![entry("level", &["ground", "sky"], LoadOptions::NONE)],
    );

    director.load_title_set()?;
    assert!(drive(&host, &mut director, 50));
    assert_eq!(host.loads_issued(), 2);
    assert_eq!(host.unloads_issued(), 0);

    // Reloading the same entry unloads and reloads both matched scenes.
    director.reload_current_set()?;
    assert!(drive(&host, &mut director, 50));
    assert_eq!(host.unloads_issued(), 2);
    assert_eq!(host.loads_issued(), 4);
    Ok(())
}

#[test]
fn loading_flag_and_progress_track_the_request() -> Result<()> {
    let (host, _bus, mut director) = director_over(
        0.25,
        vec![entry("title", &["menu"], LoadOptions::NONE)],
    );
    assert!(!director.is_loading());
    assert_relative_eq!(director.progress(), 0.0);

    director.load_title_set()?;
    assert!(director.is_loading());

    assert!(drive(&host, &mut director, 50));
    assert_relative_eq!(director.progress(), 1.0);
    Ok(())
}

#[test]
fn director_with_no_entries_rejects_title_load() {
    let (_host, _bus, mut director) = director_over(0.5, Vec::new());
    assert!(matches!(
        director.load_title_set(),
        Err(SceneError::UnknownSet { .. })
    ));
}
