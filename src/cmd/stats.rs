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

use std::fmt::Display;
use std::fmt::Formatter;

use clap::ValueEnum;
use serde::Serialize;

use crate::collection::Collection;
use crate::collection::Screen;
use crate::error::Fallible;
use crate::session::controller::Binding;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
pub enum StatsFormat {
    /// One line per screen.
    Text,
    /// JSON output.
    Json,
}

impl Display for StatsFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StatsFormat::Text => write!(f, "text"),
            StatsFormat::Json => write!(f, "json"),
        }
    }
}

pub fn print_stats(directory: Option<String>, format: StatsFormat) -> Fallible<()> {
    let collection = Collection::new(directory)?;
    let stats = collection_stats(&collection);
    match format {
        StatsFormat::Text => {
            for screen in &stats {
                println!(
                    "{}: {} items in {} groups ({})",
                    screen.name, screen.item_count, screen.group_count, screen.format
                );
            }
        }
        StatsFormat::Json => {
            let stats_json = serde_json::to_string_pretty(&stats)?;
            println!("{stats_json}");
        }
    }
    Ok(())
}

fn collection_stats(collection: &Collection) -> Vec<ScreenStats> {
    collection.screens.iter().map(|s| screen_stats(s)).collect()
}

fn screen_stats(screen: &Screen) -> ScreenStats {
    ScreenStats {
        name: screen.name.clone(),
        title: screen.title.clone(),
        format: screen.format.to_string(),
        item_count: screen.item_count(),
        group_count: screen.groups.len(),
        tracking: screen.binding == Binding::KnownUnknown,
        groups: screen
            .groups
            .iter()
            .map(|g| GroupStats {
                label: g.label().to_string(),
                item_count: g.len(),
            })
            .collect(),
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScreenStats {
    name: String,
    title: String,
    format: String,
    item_count: usize,
    group_count: usize,
    tracking: bool,
    groups: Vec<GroupStats>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GroupStats {
    label: String,
    item_count: usize,
}
