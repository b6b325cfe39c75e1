use super::action::{Action, ActionType, LayerIdentification};
use super::basic::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum CompletionActionType {
    First = 0,
    Last = 1,
    AfterAction = 2,
    AfterTime = 3,
}

/// One triggerable unit: an ordered list of actions fired together.
#[derive(Clone, PartialEq, prost::Message)]
pub struct Cue {
    #[prost(message, optional, tag = "1")]
    pub uuid: Option<Uuid>,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(enumeration = "CompletionActionType", tag = "5")]
    pub completion_action_type: i32,
    #[prost(message, repeated, tag = "10")]
    pub actions: Vec<Action>,
    #[prost(bool, tag = "12")]
    pub is_enabled: bool,
}

impl Cue {
    /// Enabled cue that completes after its last action.
    pub fn new(uuid: String) -> Self {
        let mut cue = Self {
            uuid: Some(Uuid::new(uuid)),
            is_enabled: true,
            ..Default::default()
        };
        cue.set_completion_action_type(CompletionActionType::Last);
        cue
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn uuid_str(&self) -> &str {
        self.uuid.as_ref().map_or("", |u| u.string.as_str())
    }

    pub fn push(&mut self, action: Action) {
        self.actions.push(action);
    }

    pub fn actions_of(&self, kind: ActionType) -> impl Iterator<Item = &Action> {
        self.actions
            .iter()
            .filter(move |action| action.action_type() == kind)
    }

    /// Point every slide action at `layer`.
    pub fn retarget_slides(&mut self, layer: &LayerIdentification) {
        for action in &mut self.actions {
            if action.action_type() == ActionType::PresentationSlide {
                action.layer_identification = Some(layer.clone());
            }
        }
    }
}
