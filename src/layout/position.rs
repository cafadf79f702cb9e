//! Main- and cross-axis positioning
//!
//! Converts distributed sizes into offsets: justify-content along the
//! main axis (with auto-margin absorption taking precedence),
//! align-content across lines, and align-self within a line. All offsets
//! here are in *forward* content-box coordinates; the caller mirrors them
//! for reversed axes and adds the padding/border origin.

use crate::geometry::FlexAxes;
use crate::layout::context::FlexItem;
use crate::style::types::{Align, Justify};

/// Leading offset and extra inter-item spacing for one distribution
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(crate) struct SpacePlan {
  /// Offset before the first item/line
  pub lead: f32,
  /// Extra spacing between consecutive items/lines (on top of the gap)
  pub between: f32,
}

/// Resolves justify-content into a spacing plan
///
/// The `space-*` variants only act on positive remaining space and (for
/// `space-between`) more than one item; `flex-end` and `center` shift
/// even when the remaining space is negative, letting content overflow
/// symmetrically.
pub(crate) fn resolve_justify(justify: Justify, remaining: f32, count: usize) -> SpacePlan {
  if count == 0 {
    return SpacePlan::default();
  }
  match justify {
    Justify::FlexStart => SpacePlan::default(),
    Justify::FlexEnd => SpacePlan {
      lead: remaining,
      between: 0.0,
    },
    Justify::Center => SpacePlan {
      lead: remaining / 2.0,
      between: 0.0,
    },
    Justify::SpaceBetween => {
      if remaining > 0.0 && count > 1 {
        SpacePlan {
          lead: 0.0,
          between: remaining / (count - 1) as f32,
        }
      } else {
        SpacePlan::default()
      }
    }
    Justify::SpaceAround => {
      if remaining > 0.0 {
        let share = remaining / count as f32;
        SpacePlan {
          lead: share / 2.0,
          between: share,
        }
      } else {
        SpacePlan {
          lead: remaining / 2.0,
          between: 0.0,
        }
      }
    }
    Justify::SpaceEvenly => {
      if remaining > 0.0 {
        let share = remaining / (count + 1) as f32;
        SpacePlan {
          lead: share,
          between: share,
        }
      } else {
        SpacePlan {
          lead: remaining / 2.0,
          between: 0.0,
        }
      }
    }
  }
}

/// Resolves align-content into a spacing plan plus a per-line stretch
///
/// Mirrors the per-item justify logic one level up. Returns the plan and
/// the extra cross size each line receives under `stretch`.
pub(crate) fn resolve_align_content(align: Align, leftover: f32, count: usize) -> (SpacePlan, f32) {
  if count == 0 {
    return (SpacePlan::default(), 0.0);
  }
  match align {
    Align::FlexEnd => (
      SpacePlan {
        lead: leftover,
        between: 0.0,
      },
      0.0,
    ),
    Align::Center => (
      SpacePlan {
        lead: leftover / 2.0,
        between: 0.0,
      },
      0.0,
    ),
    Align::SpaceBetween => {
      if leftover > 0.0 && count > 1 {
        (
          SpacePlan {
            lead: 0.0,
            between: leftover / (count - 1) as f32,
          },
          0.0,
        )
      } else {
        (SpacePlan::default(), 0.0)
      }
    }
    Align::SpaceAround => {
      if leftover > 0.0 {
        let share = leftover / count as f32;
        (
          SpacePlan {
            lead: share / 2.0,
            between: share,
          },
          0.0,
        )
      } else {
        (
          SpacePlan {
            lead: leftover / 2.0,
            between: 0.0,
          },
          0.0,
        )
      }
    }
    Align::Stretch => {
      if leftover > 0.0 {
        (SpacePlan::default(), leftover / count as f32)
      } else {
        (SpacePlan::default(), 0.0)
      }
    }
    // FlexStart, Auto, Baseline: no redistribution.
    _ => (SpacePlan::default(), 0.0),
  }
}

/// Positions one line's items along the main axis
///
/// Sets each item's `main_pos` to its border-box offset in forward
/// content-box coordinates. When any item carries an auto main-axis
/// margin and there is positive remaining space, the auto margins absorb
/// all of it equally and justify-content is ignored for the line.
pub(crate) fn position_line_main(
  items: &mut [FlexItem],
  axes: FlexAxes,
  inner_main: f32,
  justify: Justify,
  gap: f32,
) {
  let used: f32 = items
    .iter()
    .enumerate()
    .map(|(position, item)| {
      let gap_part = if position > 0 { gap } else { 0.0 };
      gap_part + item.outer_main(axes)
    })
    .sum();
  let remaining = inner_main - used;

  let auto_count: usize = items
    .iter()
    .map(|item| {
      let (start, end) = item.main_margin_auto(axes);
      usize::from(start) + usize::from(end)
    })
    .sum();

  let (plan, auto_share) = if auto_count > 0 && remaining > 0.0 {
    (SpacePlan::default(), remaining / auto_count as f32)
  } else {
    (resolve_justify(justify, remaining, items.len()), 0.0)
  };

  let mut cursor = plan.lead;
  for (position, item) in items.iter_mut().enumerate() {
    if position > 0 {
      cursor += gap + plan.between;
    }
    let (lead_auto, trail_auto) = item.main_margin_auto(axes);
    if lead_auto {
      cursor += auto_share;
    }
    cursor += axes.main_leading(item.margin);
    item.main_pos = cursor;
    cursor += item.target;
    cursor += axes.main_trailing(item.margin);
    if trail_auto {
      cursor += auto_share;
    }
  }
}

/// Cross-axis offset of one item's border box within its line
///
/// `line_cross` is the line's cross size; `max_baseline` the line's
/// largest baseline (only consulted for baseline alignment). Auto cross
/// margins override alignment: both sides auto centers the item, one
/// side auto pushes it to the opposite edge.
pub(crate) fn cross_offset_in_line(
  item: &FlexItem,
  axes: FlexAxes,
  line_cross: f32,
  max_baseline: f32,
  baseline_valid: bool,
) -> f32 {
  let (lead_auto, trail_auto) = item.cross_margin_auto(axes);
  let free = line_cross - item.outer_cross(axes);
  if lead_auto && trail_auto {
    return axes.cross_leading(item.margin) + (free / 2.0).max(0.0);
  }
  if lead_auto {
    return axes.cross_leading(item.margin) + free.max(0.0);
  }
  let margin_start = axes.cross_leading(item.margin);
  if trail_auto {
    // A trailing auto margin pins the item to the leading edge.
    return margin_start;
  }
  match item.align {
    Align::FlexStart | Align::Auto | Align::Stretch => margin_start,
    Align::FlexEnd => margin_start + free,
    Align::Center => margin_start + free / 2.0,
    Align::Baseline => {
      if baseline_valid {
        // Align this item's baseline to the line's deepest baseline.
        margin_start + (max_baseline - item.baseline).max(0.0)
      } else {
        margin_start
      }
    }
    // Space* are not meaningful per item.
    _ => margin_start,
  }
}
