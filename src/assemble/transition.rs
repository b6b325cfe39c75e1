//! Transition presentations: a base cue with the service side effects, one
//! cue per announcement topic, and `CLEAR` cues between topics.

use tracing::{debug, info};

use crate::document::action::{ClearTargetLayer, LayerIdentification};
use crate::document::basic::Uuid;
use crate::document::{Action, Arrangement, Cue, Presentation};
use crate::ids::IdSource;
use crate::payload::values::non_empty;
use crate::payload::{MediaDescriptor, TransitionPayload};

use super::Assembler;
use super::actions::{
    ACTION_LABEL_COLOR, SLIDES_LAYER_NAME, audience_look_action, clear_action, countdown_action,
    labelled, playlist_action, prop_action, slide_action, stage_layout_action,
};
use super::media::topic_media_action;
use super::new_group;
use super::slide::blank_slide;

/// Name of the separator cue and its slide label.
pub const CLEAR_LABEL: &str = "CLEAR";

/// Outcome of a transition assembly.
#[derive(Debug, Clone, Default)]
pub struct TransitionAssembly {
    pub cues_written: usize,
    pub topics: usize,
    /// Uuid of the single group holding every cue.
    pub group_uuid: String,
}

impl Assembler {
    /// Replace the cues of `doc` with a transition sequence and point every
    /// arrangement at the single group that holds them.
    pub fn assemble_transition(
        &mut self,
        doc: &mut Presentation,
        payload: &TransitionPayload,
    ) -> TransitionAssembly {
        let label = payload.label();
        let topics: Vec<(&str, Option<&MediaDescriptor>)> = payload.topics().collect();

        let mut cues = Vec::with_capacity(topics.len() * 2 + 1);
        cues.push(self.transition_base_cue(payload));
        for (i, (topic, media)) in topics.iter().enumerate() {
            cues.push(self.topic_cue(topic, *media));
            if i + 1 < topics.len() {
                cues.push(self.clear_cue(payload));
            }
        }

        let ids = self.ids.as_mut();
        let group_id = ids.next_id();
        let app_group_id = ids.next_id();
        let cue_ids: Vec<String> = cues
            .iter()
            .map(|cue| cue.uuid_str().to_string())
            .filter(|id| !id.is_empty())
            .collect();

        let layer = LayerIdentification {
            uuid: Some(Uuid::new(group_id.clone())),
            name: label.to_string(),
        };
        for cue in &mut cues {
            cue.retarget_slides(&layer);
        }

        doc.cues = cues;
        doc.cue_groups = vec![new_group(
            group_id.clone(),
            app_group_id,
            label,
            ACTION_LABEL_COLOR,
            cue_ids,
        )];

        if doc.arrangements.is_empty() {
            doc.arrangements.push(Arrangement {
                uuid: Some(Uuid::new(ids.next_id())),
                name: "Default".to_string(),
                group_identifiers: vec![Uuid::new(group_id.clone())],
            });
        } else {
            for arrangement in &mut doc.arrangements {
                arrangement.group_identifiers = vec![Uuid::new(group_id.clone())];
            }
        }

        info!(
            label,
            cues = doc.cues.len(),
            topics = topics.len(),
            "transition assembled"
        );
        TransitionAssembly {
            cues_written: doc.cues.len(),
            topics: topics.len(),
            group_uuid: group_id,
        }
    }

    fn transition_base_cue(&mut self, payload: &TransitionPayload) -> Cue {
        let ids = self.ids.as_mut();
        let label = payload.label();
        let mut cue = Cue::new(ids.next_id()).named(label);

        cue.push(blank_slide_action(ids, label, ""));
        if let Some(look) = audience_look_action(ids, payload.audience_look()) {
            cue.push(look);
        }
        if let Some(stage) = payload
            .stage_layout
            .as_ref()
            .and_then(|layout| stage_layout_action(ids, layout))
        {
            cue.push(stage);
        }
        if let Some(seconds) = payload.timer_seconds() {
            let action_name = format!("Countdown {}s", seconds.round() as i64);
            let descriptor = payload.timer_descriptor.as_ref();
            let timer_name = descriptor
                .and_then(|d| d.name())
                .unwrap_or(&action_name)
                .to_string();
            cue.push(countdown_action(ids, &action_name, &timer_name, seconds, descriptor));
        }
        cue
    }

    fn topic_cue(&mut self, topic: &str, media: Option<&MediaDescriptor>) -> Cue {
        let ids = self.ids.as_mut();
        let mut cue = Cue::new(ids.next_id()).named(topic);
        cue.push(blank_slide_action(ids, topic, topic));

        let Some(media) = media else {
            return cue;
        };
        let paths = &self.options.user_paths;
        if let Some(action) = topic_media_action(ids, media, paths, self.probe.as_ref()) {
            cue.push(action);
        } else if let Some(item_uuid) = non_empty(media.uuid.as_deref()) {
            let item_name = non_empty(media.name.as_deref()).unwrap_or(topic);
            cue.push(playlist_action(
                ids,
                item_uuid,
                item_name,
                non_empty(media.playlist_uuid.as_deref()),
                non_empty(media.playlist_name.as_deref()),
            ));
            info!(
                topic,
                media = item_name,
                uuid = item_uuid,
                score = media.score.filter(|s| s.is_finite()),
                "topic media from playlist"
            );
        } else {
            debug!(topic, "topic media has neither a file nor a uuid");
        }
        cue
    }

    fn clear_cue(&mut self, payload: &TransitionPayload) -> Cue {
        let ids = self.ids.as_mut();
        let mut cue = Cue::new(ids.next_id()).named(CLEAR_LABEL);
        cue.push(blank_slide_action(ids, CLEAR_LABEL, CLEAR_LABEL));
        cue.push(clear_action(ids, "Clear", ClearTargetLayer::Background));
        if let Some(prop) = &payload.prop {
            cue.push(prop_action(ids, non_empty(prop.prop_uuid.as_deref())));
        }
        cue
    }
}

/// Slide action with an empty slide on a fresh `Slides` layer.
fn blank_slide_action(ids: &mut dyn IdSource, name: &str, label: &str) -> Action {
    let slide = blank_slide(ids);
    let layer = ids.next_id();
    labelled(slide_action(ids, name, slide), label).with_layer(layer, SLIDES_LAYER_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assemble::media::FixedProbe;
    use crate::assemble::AssemblyOptions;
    use crate::document::{ActionData, ActionType};
    use crate::ids::SequentialIds;
    use crate::payload::parse_transition;
    use crate::util::UserPaths;

    fn assembler() -> Assembler {
        Assembler::new()
            .with_ids(SequentialIds::new())
            .with_probe(FixedProbe::default())
            .with_options(AssemblyOptions::default().with_user_paths(UserPaths::new("/nonexistent")))
    }

    fn kinds(cue: &Cue) -> Vec<ActionType> {
        cue.actions.iter().map(|a| a.action_type()).collect()
    }

    #[test]
    fn test_transition_layout() {
        let payload = parse_transition(
            r#"{
                "label": "Walk In",
                "timerSeconds": 89.6,
                "topics": [
                    {"topic": "Welcome", "media": {"mediaUuid": "M-1", "playlistUuid": "P-1"}},
                    {"topic": "Offering"},
                    {"topic": "Kids"}
                ],
                "prop": {"propUuid": "PROP-1"}
            }"#,
        )
        .unwrap();
        let mut doc = Presentation::default();
        let result = assembler().assemble_transition(&mut doc, &payload);

        let names: Vec<&str> = doc.cues.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Walk In", "Welcome", "CLEAR", "Offering", "CLEAR", "Kids"]
        );
        assert_eq!(result.cues_written, 6);
        assert_eq!(result.topics, 3);

        let base = &doc.cues[0];
        assert_eq!(
            kinds(base),
            vec![
                ActionType::PresentationSlide,
                ActionType::AudienceLook,
                ActionType::Timer
            ]
        );
        assert_eq!(base.actions[1].name, "Audience Look \u{2022} Full Screen Media");
        assert_eq!(base.actions[2].name, "Countdown 90s");

        assert_eq!(
            kinds(&doc.cues[1]),
            vec![ActionType::PresentationSlide, ActionType::MediaBinPlaylist]
        );
        assert_eq!(doc.cues[1].actions[0].label.as_ref().unwrap().text, "Welcome");
        assert_eq!(doc.cues[1].actions[1].name, "Welcome");

        let clear = &doc.cues[2];
        assert_eq!(
            kinds(clear),
            vec![ActionType::PresentationSlide, ActionType::Clear, ActionType::Prop]
        );
        let Some(ActionData::Prop(prop)) = &clear.actions[2].data else {
            panic!("expected prop action");
        };
        let identification = prop.identification.as_ref().unwrap();
        assert_eq!(identification.parameter_name, "Logo");
        assert_eq!(identification.parameter_uuid, Some(Uuid::new("PROP-1")));
    }

    #[test]
    fn test_transition_group_and_arrangements() {
        let payload = parse_transition(r#"{"topics": [{"topic": "Welcome"}]}"#).unwrap();
        let mut doc = Presentation::default();
        doc.arrangements.push(Arrangement {
            uuid: Some(Uuid::new("R-1")),
            name: "Main".into(),
            group_identifiers: vec![Uuid::new("OLD-1"), Uuid::new("OLD-2")],
        });
        let result = assembler().assemble_transition(&mut doc, &payload);

        assert_eq!(doc.cue_groups.len(), 1);
        let group = doc.cue_groups[0].group.as_ref().unwrap();
        assert_eq!(group.name, "Background & Lights");
        assert_eq!(group.color.unwrap().components(), ACTION_LABEL_COLOR);
        assert_eq!(doc.cue_groups[0].cue_identifiers.len(), 2);
        assert_eq!(
            doc.arrangements[0].group_identifiers,
            vec![Uuid::new(result.group_uuid.clone())]
        );

        for cue in &doc.cues {
            for action in cue.actions_of(ActionType::PresentationSlide) {
                let layer = action.layer_identification.as_ref().unwrap();
                assert_eq!(layer.uuid, Some(Uuid::new(result.group_uuid.clone())));
                assert_eq!(layer.name, "Background & Lights");
            }
        }
    }

    #[test]
    fn test_transition_without_topics_creates_default_arrangement() {
        let payload = parse_transition("{}").unwrap();
        let mut doc = Presentation::default();
        let result = assembler().assemble_transition(&mut doc, &payload);
        assert_eq!(result.cues_written, 1);
        assert_eq!(doc.arrangements.len(), 1);
        assert_eq!(doc.arrangements[0].name, "Default");
        assert!(doc.selected_arrangement.is_none());
    }

    #[test]
    fn test_clear_cue_without_prop() {
        let payload =
            parse_transition(r#"{"topics": [{"topic": "A"}, {"topic": "B"}]}"#).unwrap();
        let mut doc = Presentation::default();
        assembler().assemble_transition(&mut doc, &payload);
        assert_eq!(
            kinds(&doc.cues[2]),
            vec![ActionType::PresentationSlide, ActionType::Clear]
        );
        let Some(ActionData::Clear(clear)) = &doc.cues[2].actions[1].data else {
            panic!("expected clear action");
        };
        assert_eq!(clear.target_layer(), ClearTargetLayer::Background);
    }
}
