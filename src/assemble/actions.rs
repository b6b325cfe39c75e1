//! Builders for the side-effect actions carried by synthetic cues.

use crate::document::action::{
    AudienceLookType, ClearTargetLayer, ClearType, Countdown, PlaylistItemType, PropType,
    ScreenAssignment, SlideType, StageLayoutType, TimerAction, TimerConfiguration, TimerType,
};
use crate::document::basic::{CollectionElement, Color, Uuid};
use crate::document::{Action, ActionData, PresentationSlide};
use crate::ids::IdSource;
use crate::payload::values::{Rgba, non_empty};
use crate::payload::{StageLayout, TimerDescriptor};

/// Label color of every generated action.
pub const ACTION_LABEL_COLOR: Rgba = [0.054, 0.211, 0.588, 1.0];

pub const SLIDES_LAYER_UUID: &str = "slides";
pub const SLIDES_LAYER_NAME: &str = "Slides";
pub const SERVICE_TIMER_NAME: &str = "Service Timer";
pub const LOGO_PROP_NAME: &str = "Logo";

pub(crate) fn labelled(action: Action, text: impl Into<String>) -> Action {
    action.with_label(text, Color::rgba(ACTION_LABEL_COLOR))
}

/// Action that shows `slide`.
pub fn slide_action(ids: &mut dyn IdSource, name: &str, slide: PresentationSlide) -> Action {
    Action::new(
        ids.next_id(),
        name,
        ActionData::Slide(SlideType {
            presentation: Some(slide),
        }),
    )
}

pub fn clear_action(ids: &mut dyn IdSource, name: &str, layer: ClearTargetLayer) -> Action {
    labelled(
        Action::new(ids.next_id(), name, ActionData::Clear(ClearType::of(layer))),
        "",
    )
}

/// Reset-and-start countdown timer.
///
/// The timer is identified by the descriptor's uuid when it has one, so an
/// existing timer in the host application is reused; otherwise a fresh
/// uuid is minted.
pub fn countdown_action(
    ids: &mut dyn IdSource,
    action_name: &str,
    timer_name: &str,
    seconds: f64,
    descriptor: Option<&TimerDescriptor>,
) -> Action {
    let action_id = ids.next_id();
    let timer_uuid = match descriptor.and_then(TimerDescriptor::uuid) {
        Some(uuid) => uuid.to_string(),
        None => ids.next_id(),
    };

    let mut timer = TimerType {
        timer_identification: Some(CollectionElement::named(timer_name).with_uuid(timer_uuid)),
        timer_configuration: Some(TimerConfiguration {
            allows_overrun: descriptor.and_then(|d| d.allows_overrun).unwrap_or(false),
            countdown: Some(Countdown { duration: seconds }),
        }),
        ..Default::default()
    };
    timer.set_action_type(TimerAction::ResetAndStart);

    labelled(
        Action::new(action_id, action_name, ActionData::Timer(timer)),
        "",
    )
}

/// `Audience Look • <name>`; `None` for a blank look name.
pub fn audience_look_action(ids: &mut dyn IdSource, look_name: &str) -> Option<Action> {
    let look_name = non_empty(Some(look_name))?;
    let look = AudienceLookType {
        identification: Some(CollectionElement::named(look_name)),
    };
    Some(labelled(
        Action::new(
            ids.next_id(),
            format!("Audience Look \u{2022} {look_name}"),
            ActionData::AudienceLook(look),
        ),
        "",
    ))
}

/// Stage layout assignment; `None` when the layout assigns no screens.
pub fn stage_layout_action(ids: &mut dyn IdSource, layout: &StageLayout) -> Option<Action> {
    if layout.assignments.is_empty() {
        return None;
    }
    let layout_name = non_empty(layout.layout_name.as_deref());
    let layout_uuid = non_empty(layout.layout_uuid.as_deref());

    let assignments = layout
        .assignments
        .iter()
        .map(|assignment| ScreenAssignment {
            screen: Some(element(
                non_empty(assignment.uuid.as_deref()),
                non_empty(assignment.name.as_deref()),
            )),
            layout: Some(element(layout_uuid, layout_name)),
        })
        .collect();

    Some(labelled(
        Action::new(
            ids.next_id(),
            layout_name.unwrap_or("Stage Layout"),
            ActionData::Stage(StageLayoutType {
                stage_screen_assignments: assignments,
            }),
        ),
        "",
    ))
}

/// Show a stage prop (the logo) by uuid.
pub fn prop_action(ids: &mut dyn IdSource, prop_uuid: Option<&str>) -> Action {
    let mut identification = CollectionElement::named(LOGO_PROP_NAME);
    if let Some(uuid) = prop_uuid {
        identification = identification.with_uuid(uuid);
    }
    labelled(
        Action::new(
            ids.next_id(),
            format!("Prop \u{2022} {LOGO_PROP_NAME}"),
            ActionData::Prop(PropType {
                identification: Some(identification),
            }),
        ),
        "",
    )
}

/// Trigger an item of a media-bin playlist.
pub fn playlist_action(
    ids: &mut dyn IdSource,
    item_uuid: &str,
    item_name: &str,
    playlist_uuid: Option<&str>,
    playlist_name: Option<&str>,
) -> Action {
    let action_id = ids.next_id();
    let layer_id = ids.next_id();
    let item = PlaylistItemType {
        playlist_uuid: playlist_uuid.map(Uuid::new),
        playlist_name: playlist_name.unwrap_or_default().to_string(),
        item_uuid: Some(Uuid::new(item_uuid)),
        item_name: item_name.to_string(),
    };
    labelled(
        Action::new(action_id, item_name, ActionData::PlaylistItem(item)),
        "",
    )
    .with_layer(layer_id, "Media")
}

fn element(uuid: Option<&str>, name: Option<&str>) -> CollectionElement {
    let mut element = CollectionElement::named(name.unwrap_or_default());
    if let Some(uuid) = uuid {
        element = element.with_uuid(uuid);
    }
    element
}
