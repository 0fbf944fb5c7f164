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

//! Turns raw pointer input on a card into discrete signals.
//!
//! The machine has two phases. A press starts a drag; moves update the
//! offset from the press point; a release or leave ends the drag and, if the
//! horizontal offset is past the swipe threshold, emits a swipe. A click that
//! does not follow a drag flips the card.

use serde::Deserialize;
use serde::Serialize;

/// Displacement past which a press is a drag and not a tap.
pub const DRAG_THRESHOLD: f64 = 10.0;

/// Horizontal displacement a drag must exceed to count as a swipe.
pub const SWIPE_THRESHOLD: f64 = 100.0;

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum PointerEvent {
    Down { x: f64, y: f64 },
    Move { x: f64, y: f64 },
    Up,
    Leave,
    Click,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Signal {
    SwipeLeft,
    SwipeRight,
    Flip,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Phase {
    Idle,
    Dragging { start: Offset, offset: Offset },
}

#[derive(Clone, Debug)]
pub struct CardGesture {
    phase: Phase,
    /// Whether the last press moved past the drag threshold. Cleared by the
    /// next press and by every click.
    was_dragged: bool,
}

impl Default for CardGesture {
    fn default() -> Self {
        Self::new()
    }
}

impl CardGesture {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            was_dragged: false,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, Phase::Dragging { .. })
    }

    /// Current offset from the press point; zero when idle.
    pub fn offset(&self) -> Offset {
        match self.phase {
            Phase::Idle => Offset::default(),
            Phase::Dragging { offset, .. } => offset,
        }
    }

    pub fn handle(&mut self, event: PointerEvent) -> Option<Signal> {
        match (self.phase, event) {
            (_, PointerEvent::Down { x, y }) => {
                self.phase = Phase::Dragging {
                    start: Offset { x, y },
                    offset: Offset::default(),
                };
                self.was_dragged = false;
                None
            }
            (Phase::Dragging { start, .. }, PointerEvent::Move { x, y }) => {
                let offset = Offset {
                    x: x - start.x,
                    y: y - start.y,
                };
                if offset.x.abs() > DRAG_THRESHOLD || offset.y.abs() > DRAG_THRESHOLD {
                    self.was_dragged = true;
                }
                self.phase = Phase::Dragging { start, offset };
                None
            }
            (Phase::Dragging { offset, .. }, PointerEvent::Up | PointerEvent::Leave) => {
                self.phase = Phase::Idle;
                if offset.x > SWIPE_THRESHOLD {
                    Some(Signal::SwipeRight)
                } else if offset.x < -SWIPE_THRESHOLD {
                    Some(Signal::SwipeLeft)
                } else {
                    None
                }
            }
            (Phase::Idle, PointerEvent::Click) => {
                let was_dragged = self.was_dragged;
                self.was_dragged = false;
                if was_dragged { None } else { Some(Signal::Flip) }
            }
            // Browsers deliver the click after the release. A click that
            // arrives mid-drag belongs to no gesture.
            (Phase::Dragging { .. }, PointerEvent::Click) => None,
            (Phase::Idle, PointerEvent::Move { .. } | PointerEvent::Up | PointerEvent::Leave) => {
                None
            }
        }
    }

    /// Feeds a sequence of events through the machine, collecting the
    /// signals it emits in order.
    pub fn replay<I>(&mut self, events: I) -> Vec<Signal>
    where
        I: IntoIterator<Item = PointerEvent>,
    {
        events
            .into_iter()
            .filter_map(|event| self.handle(event))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drag(dx: f64, dy: f64) -> Vec<PointerEvent> {
        vec![
            PointerEvent::Down { x: 200.0, y: 200.0 },
            PointerEvent::Move {
                x: 200.0 + dx / 2.0,
                y: 200.0 + dy / 2.0,
            },
            PointerEvent::Move {
                x: 200.0 + dx,
                y: 200.0 + dy,
            },
            PointerEvent::Up,
        ]
    }

    #[test]
    fn test_swipe_right() {
        let mut g = CardGesture::new();
        assert_eq!(g.replay(drag(101.0, 0.0)), vec![Signal::SwipeRight]);
        assert!(!g.is_dragging());
        assert_eq!(g.offset(), Offset::default());
    }

    #[test]
    fn test_swipe_left() {
        let mut g = CardGesture::new();
        assert_eq!(g.replay(drag(-101.0, 0.0)), vec![Signal::SwipeLeft]);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let mut g = CardGesture::new();
        assert!(g.replay(drag(100.0, 0.0)).is_empty());
        assert!(g.replay(drag(-100.0, 0.0)).is_empty());
    }

    #[test]
    fn test_short_drag_then_tap_flips() {
        let mut g = CardGesture::new();
        assert!(g.replay(drag(60.0, 5.0)).is_empty());
        // The drag above went past ten units, so its own click is swallowed.
        assert_eq!(g.handle(PointerEvent::Click), None);
        // A plain tap after that flips.
        let tap = vec![
            PointerEvent::Down { x: 0.0, y: 0.0 },
            PointerEvent::Move { x: 4.0, y: -3.0 },
            PointerEvent::Up,
            PointerEvent::Click,
        ];
        assert_eq!(g.replay(tap), vec![Signal::Flip]);
    }

    #[test]
    fn test_drag_threshold_applies_to_both_axes() {
        let mut g = CardGesture::new();
        g.replay(drag(0.0, 11.0));
        assert_eq!(g.handle(PointerEvent::Click), None);
        g.replay(drag(10.0, 10.0));
        assert_eq!(g.handle(PointerEvent::Click), Some(Signal::Flip));
    }

    #[test]
    fn test_vertical_drag_does_not_swipe() {
        let mut g = CardGesture::new();
        assert!(g.replay(drag(0.0, 300.0)).is_empty());
    }

    #[test]
    fn test_leave_ends_drag() {
        let mut g = CardGesture::new();
        g.handle(PointerEvent::Down { x: 0.0, y: 0.0 });
        g.handle(PointerEvent::Move { x: -150.0, y: 0.0 });
        assert!(g.is_dragging());
        assert_eq!(g.offset().x, -150.0);
        assert_eq!(g.handle(PointerEvent::Leave), Some(Signal::SwipeLeft));
        assert!(!g.is_dragging());
        // A second release is ignored.
        assert_eq!(g.handle(PointerEvent::Up), None);
    }

    #[test]
    fn test_idle_moves_are_ignored() {
        let mut g = CardGesture::new();
        assert_eq!(g.handle(PointerEvent::Move { x: 500.0, y: 0.0 }), None);
        assert!(!g.is_dragging());
        assert_eq!(g.handle(PointerEvent::Click), Some(Signal::Flip));
    }

    #[test]
    fn test_new_press_restarts_drag() {
        let mut g = CardGesture::new();
        g.handle(PointerEvent::Down { x: 0.0, y: 0.0 });
        g.handle(PointerEvent::Move { x: 90.0, y: 0.0 });
        g.handle(PointerEvent::Down { x: 90.0, y: 0.0 });
        g.handle(PointerEvent::Move { x: 150.0, y: 0.0 });
        assert_eq!(g.handle(PointerEvent::Up), None);
    }

    #[test]
    fn test_events_deserialize() {
        let events: Vec<PointerEvent> = serde_json::from_str(
            r#"[{"type":"down","x":1,"y":2},{"type":"move","x":3.5,"y":2},{"type":"up"},{"type":"click"}]"#,
        )
        .unwrap();
        assert_eq!(events[0], PointerEvent::Down { x: 1.0, y: 2.0 });
        assert_eq!(events[1], PointerEvent::Move { x: 3.5, y: 2.0 });
        assert_eq!(events[3], PointerEvent::Click);
        assert_eq!(
            serde_json::to_string(&Signal::SwipeRight).unwrap(),
            "\"swipe-right\""
        );
    }
}
