// Copyright 2025 Fernando Borretti
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

use std::collections::HashSet;
use std::env::current_dir;
use std::fs::read_to_string;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use serde::Deserialize;
use walkdir::WalkDir;

use crate::dataset::Format;
use crate::dataset::load_dataset;
use crate::error::Fallible;
use crate::error::fail;
use crate::session::controller::Binding;
use crate::session::controller::Controller;
use crate::session::grouping::Group;
use crate::session::grouping::Grouping;
use crate::types::layout::CardLayout;

pub const MANIFEST_FILE: &str = "kanjicards.toml";

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct Manifest {
    #[serde(default, rename = "screen")]
    screens: Vec<ScreenEntry>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ScreenEntry {
    name: String,
    title: Option<String>,
    file: PathBuf,
    format: Option<Format>,
    layout: Option<CardLayout>,
    deck_size: Option<usize>,
    #[serde(default)]
    tracking: bool,
}

/// A study screen: a dataset split into groups, plus how to show it.
pub struct Screen {
    pub name: String,
    pub title: String,
    pub format: Format,
    pub layout: CardLayout,
    pub binding: Binding,
    pub groups: Arc<[Group]>,
}

impl Screen {
    /// A fresh controller, as on mount.
    pub fn controller(&self) -> Controller {
        Controller::new(self.groups.clone(), self.binding)
    }

    pub fn item_count(&self) -> usize {
        self.groups.iter().map(Group::len).sum()
    }

    /// Whether any item on this screen has text to speak.
    pub fn is_speakable(&self) -> bool {
        self.groups
            .iter()
            .flat_map(|g| g.items())
            .any(|item| self.layout.faces(item).speakable.is_some())
    }
}

pub struct Collection {
    pub directory: PathBuf,
    pub screens: Vec<Arc<Screen>>,
}

impl Collection {
    pub fn new(directory: Option<String>) -> Fallible<Self> {
        let directory: PathBuf = match directory {
            Some(dir) => PathBuf::from(dir),
            None => current_dir()?,
        };
        let directory = if directory.exists() {
            directory.canonicalize()?
        } else {
            return fail("directory does not exist.");
        };

        let entries = {
            let manifest_path = directory.join(MANIFEST_FILE);
            if manifest_path.exists() {
                log::debug!("Reading {MANIFEST_FILE}...");
                let content = read_to_string(&manifest_path)?;
                let manifest: Manifest = toml::from_str(&content)?;
                manifest.screens
            } else {
                log::debug!("No manifest, looking for JSON datasets...");
                discover(&directory)?
            }
        };
        if entries.is_empty() {
            return fail("no datasets found.");
        }

        let start = Instant::now();
        let mut names = HashSet::new();
        let mut screens = Vec::new();
        for entry in entries {
            if entry.name.trim().is_empty() {
                return fail("screen names must not be empty.");
            }
            if !names.insert(entry.name.clone()) {
                return fail(format!("duplicate screen name '{}'.", entry.name));
            }
            screens.push(Arc::new(load_screen(&directory, entry)?));
        }
        let duration = start.elapsed().as_millis();
        log::debug!("Loaded {} screens in {duration}ms.", screens.len());

        Ok(Self {
            directory,
            screens,
        })
    }

    pub fn screen(&self, name: &str) -> Option<Arc<Screen>> {
        self.screens.iter().find(|s| s.name == name).cloned()
    }
}

fn discover(directory: &Path) -> Fallible<Vec<ScreenEntry>> {
    let mut entries = Vec::new();
    for entry in WalkDir::new(directory)
        .min_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            let Some(stem) = path.file_stem() else {
                continue;
            };
            let file = path.strip_prefix(directory).unwrap_or(path).to_path_buf();
            entries.push(ScreenEntry {
                name: stem.to_string_lossy().to_string(),
                title: None,
                file,
                format: None,
                layout: None,
                deck_size: None,
                tracking: false,
            });
        }
    }
    Ok(entries)
}

fn load_screen(directory: &Path, entry: ScreenEntry) -> Fallible<Screen> {
    let path = directory.join(&entry.file);
    if !path.exists() {
        return fail(format!(
            "screen '{}': file {} does not exist.",
            entry.name,
            entry.file.display()
        ));
    }
    let (format, dataset) = load_dataset(&path, entry.format)?;
    let grouping = match entry.deck_size.or(format.default_deck_size()) {
        Some(0) => {
            return fail(format!("screen '{}': deck_size must be positive.", entry.name));
        }
        Some(size) => Grouping::Chunked { size },
        None => Grouping::Categories,
    };
    log::debug!(
        "Screen '{}': {} items from {} ({format}).",
        entry.name,
        dataset.item_count(),
        entry.file.display()
    );
    let groups = grouping.apply(dataset);
    let binding = if entry.tracking {
        Binding::KnownUnknown
    } else {
        Binding::Navigate
    };
    Ok(Screen {
        title: entry.title.unwrap_or_else(|| entry.name.clone()),
        name: entry.name,
        format,
        layout: entry.layout.unwrap_or(format.default_layout()),
        binding,
        groups: groups.into(),
    })
}
