//! Media actions: background video on the prefix cue and topic images on
//! transition cues.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info, warn};

use crate::document::action::{AudioSettings, LayerType, MediaType};
use crate::document::basic::{LocalRelativePath, LocalRoot, Platform, Url, Uuid};
use crate::document::media::{
    AudioProperties, DrawingProperties, FileProperties, ImageTypeProperties, Media, Metadata,
    PlaybackBehavior, ScaleBehavior, TransportProperties, TypeProperties, VideoProperties,
    VideoTypeProperties,
};
use crate::document::{Action, ActionData};
use crate::ids::IdSource;
use crate::payload::values::non_empty;
use crate::payload::{BackgroundMedia, MediaDescriptor};
use crate::util::{UserPaths, absolutize, file_uri};

use super::actions::labelled;

/// Natural size assumed when a probe cannot measure a file.
pub const DEFAULT_MEDIA_SIZE: (f64, f64) = (1920.0, 1080.0);

/// File extensions considered when looking up a background by name.
pub const BACKGROUND_EXTENSIONS: &[&str] = &["mov", "mp4", "m4v"];

const DEFAULT_FRAME_RATE: f64 = 30.0;
const DEFAULT_SOFT_LOOP: f64 = 0.5;

/// Measures the pixel size of an image or video.
pub trait MediaProbe {
    fn dimensions(&self, path: &Path) -> Option<(f64, f64)>;
}

/// Probe backed by the macOS `sips` tool.
#[derive(Debug, Default, Clone, Copy)]
pub struct SipsProbe;

impl MediaProbe for SipsProbe {
    fn dimensions(&self, path: &Path) -> Option<(f64, f64)> {
        let output = match Command::new("sips")
            .args(["-g", "pixelWidth", "-g", "pixelHeight"])
            .arg(path)
            .output()
        {
            Ok(output) => output,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "failed to run sips");
                return None;
            }
        };
        if !output.status.success() {
            debug!(path = %path.display(), status = %output.status, "sips failed");
            return None;
        }
        parse_sips(&String::from_utf8_lossy(&output.stdout))
    }
}

/// Probe that reports the same size for every file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedProbe {
    pub width: f64,
    pub height: f64,
}

impl Default for FixedProbe {
    fn default() -> Self {
        let (width, height) = DEFAULT_MEDIA_SIZE;
        Self { width, height }
    }
}

impl MediaProbe for FixedProbe {
    fn dimensions(&self, _path: &Path) -> Option<(f64, f64)> {
        Some((self.width, self.height))
    }
}

fn parse_sips(text: &str) -> Option<(f64, f64)> {
    let mut width = None;
    let mut height = None;
    for line in text.lines() {
        let line = line.trim().to_lowercase();
        if let Some(value) = line.strip_prefix("pixelwidth:") {
            width = value.trim().parse::<f64>().ok();
        } else if let Some(value) = line.strip_prefix("pixelheight:") {
            height = value.trim().parse::<f64>().ok();
        }
    }
    Some((width?, height?))
}

fn media_size(probe: &dyn MediaProbe, path: &Path) -> (f64, f64) {
    match probe.dimensions(path) {
        Some((w, h)) if w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0 => (w, h),
        _ => DEFAULT_MEDIA_SIZE,
    }
}

/// Pick the background file for the prefix cue.
///
/// An explicit path wins when it exists. Otherwise the preferred file name
/// is matched case-insensitively against the videos in `background_dir`.
pub fn resolve_background(
    config: &BackgroundMedia,
    background_dir: Option<&Path>,
    paths: &UserPaths,
) -> Option<PathBuf> {
    if let Some(raw) = non_empty(config.file_path.as_deref()) {
        let candidate = paths.expand_tilde(raw);
        if candidate.exists() {
            return Some(candidate);
        }
        warn!(path = %candidate.display(), "background file missing");
    }

    let Some(preferred) = non_empty(config.preferred_file.as_deref()) else {
        info!("no background file requested");
        return None;
    };
    let Some(dir) = background_dir else {
        warn!(preferred, "no background directory configured");
        return None;
    };

    let found = background_candidates(dir)
        .into_iter()
        .find(|path| {
            path.file_name()
                .and_then(OsStr::to_str)
                .is_some_and(|name| name.eq_ignore_ascii_case(preferred))
        });
    if found.is_none() {
        warn!(preferred, dir = %dir.display(), "preferred background not found");
    }
    found
}

/// Background videos directly inside `dir`, sorted by path.
pub fn background_candidates(dir: &Path) -> Vec<PathBuf> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "cannot read background directory");
            return Vec::new();
        }
    };
    let mut candidates: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && has_background_extension(path))
        .collect();
    candidates.sort();
    candidates
}

fn has_background_extension(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| BACKGROUND_EXTENSIONS.iter().any(|b| ext.eq_ignore_ascii_case(b)))
}

fn resolved(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| absolutize(path))
}

fn extension_format(path: &Path) -> Option<String> {
    path.extension()
        .and_then(OsStr::to_str)
        .filter(|ext| !ext.is_empty())
        .map(str::to_uppercase)
}

fn file_url(absolute: &Path, local: LocalRelativePath) -> Url {
    let mut url = Url {
        absolute_string: file_uri(absolute),
        local: Some(local),
        ..Default::default()
    };
    url.set_platform(Platform::Macos);
    url
}

fn local_path(root: LocalRoot, path: String) -> LocalRelativePath {
    let mut local = LocalRelativePath {
        path,
        ..Default::default()
    };
    local.set_root(root);
    local
}

/// Looping background video on the background layer.
pub fn background_media_action(
    ids: &mut dyn IdSource,
    path: &Path,
    config: &BackgroundMedia,
    paths: &UserPaths,
    probe: &dyn MediaProbe,
) -> Action {
    let absolute = resolved(path);
    let file_name = absolute
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let local = match paths.documents_relative(&absolute) {
        Some(rel) => local_path(LocalRoot::UserDocuments, rel),
        None => local_path(LocalRoot::UserHome, file_name),
    };

    let duration = config
        .duration_seconds
        .filter(|d| d.is_finite() && *d > 0.0);
    let (width, height) = media_size(probe, &absolute);

    let behavior = config
        .playback_behavior
        .as_deref()
        .and_then(PlaybackBehavior::from_name)
        .unwrap_or(PlaybackBehavior::Loop);
    let mut transport = TransportProperties {
        play_rate: 1.0,
        should_fade_in: config.fade_in.unwrap_or(true),
        should_fade_out: config.fade_out.unwrap_or(true),
        times_to_loop: config
            .times_to_loop
            .filter(|n| *n > 0)
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or(1),
        ..Default::default()
    };
    transport.set_playback_behavior(behavior);
    if let Some(duration) = duration {
        transport.end_point = duration;
        transport.out_point = duration;
    }

    let video = VideoTypeProperties {
        drawing: Some(DrawingProperties::sized(ScaleBehavior::Fill, width, height)),
        audio: Some(AudioProperties {
            volume: config.volume.filter(|v| v.is_finite()).unwrap_or(1.0),
        }),
        transport: Some(transport),
        video: Some(VideoProperties {
            frame_rate: config
                .frame_rate
                .filter(|f| f.is_finite() && *f > 0.0)
                .unwrap_or(DEFAULT_FRAME_RATE),
            soft_loop_duration: config
                .soft_loop_duration
                .filter(|s| s.is_finite() && *s >= 0.0)
                .unwrap_or(DEFAULT_SOFT_LOOP),
        }),
    };

    let action_id = ids.next_id();
    let element = Media {
        uuid: Some(Uuid::new(ids.next_id())),
        url: Some(file_url(&absolute, local)),
        metadata: extension_format(&absolute).map(|format| Metadata { format }),
        type_properties: Some(TypeProperties::Video(video)),
    };

    let mut media = MediaType {
        element: Some(element),
        audio: Some(AudioSettings::default()),
        ..Default::default()
    };
    media.set_layer_type(LayerType::Background);

    let stem = absolute
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut action = labelled(Action::new(action_id, stem, ActionData::Media(media)), "");
    if let Some(duration) = duration {
        action.duration = duration;
    }

    info!(
        path = %absolute.display(),
        width,
        height,
        behavior = behavior.name(),
        "background media attached"
    );
    action
}

/// Foreground image action for a topic cue.
///
/// Returns `None` unless the descriptor names a file that exists.
pub fn topic_media_action(
    ids: &mut dyn IdSource,
    descriptor: &MediaDescriptor,
    paths: &UserPaths,
    probe: &dyn MediaProbe,
) -> Option<Action> {
    let raw = non_empty(descriptor.file_path.as_deref())?;
    let path = paths.expand_tilde(raw);
    if !path.is_file() {
        debug!(path = %path.display(), "topic media file missing");
        return None;
    }
    let absolute = resolved(&path);
    let file_name = absolute
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let format = non_empty(descriptor.format_hint.as_deref())
        .map(str::to_uppercase)
        .or_else(|| extension_format(&absolute));

    let documents_rel = non_empty(descriptor.documents_relative_path.as_deref())
        .map(|rel| rel.trim_start_matches('/').to_string())
        .filter(|rel| !rel.is_empty())
        .or_else(|| paths.documents_relative(&absolute));
    let local = match documents_rel {
        Some(rel) => local_path(LocalRoot::UserDocuments, rel),
        None => {
            let rel = paths
                .home_relative(&absolute)
                .unwrap_or_else(|| absolute.to_string_lossy().into_owned());
            local_path(LocalRoot::UserHome, rel)
        }
    };
    let url = file_url(&absolute, local);

    let (width, height) = media_size(probe, &absolute);
    let image = ImageTypeProperties {
        drawing: Some(DrawingProperties::sized(ScaleBehavior::Fit, width, height)),
        file: Some(FileProperties {
            local_url: Some(url.clone()),
        }),
    };

    let action_id = ids.next_id();
    let element = Media {
        uuid: Some(Uuid::new(ids.next_id())),
        url: Some(url),
        metadata: format.map(|format| Metadata { format }),
        type_properties: Some(TypeProperties::Image(image)),
    };
    let mut media = MediaType {
        element: Some(element),
        audio: Some(AudioSettings::default()),
        ..Default::default()
    };
    media.set_layer_type(LayerType::Foreground);

    info!(path = %absolute.display(), width, height, "topic media attached");
    Some(labelled(
        Action::new(action_id, file_name.clone(), ActionData::Media(media)),
        file_name,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIds;
    use tempfile::TempDir;

    fn home() -> (TempDir, UserPaths) {
        let dir = TempDir::new().unwrap();
        let root = fs::canonicalize(dir.path()).unwrap();
        fs::create_dir_all(root.join("Documents/Backgrounds")).unwrap();
        (dir, UserPaths::new(root))
    }

    fn media_of(action: &Action) -> &MediaType {
        match &action.data {
            Some(ActionData::Media(media)) => media,
            _ => panic!("expected a media action"),
        }
    }

    #[test]
    fn test_parse_sips_output() {
        let text = "/tmp/a.png\n  pixelWidth: 1280\n  pixelHeight: 720\n";
        assert_eq!(parse_sips(text), Some((1280.0, 720.0)));
        assert_eq!(parse_sips("  pixelWidth: 1280\n"), None);
        assert_eq!(parse_sips("pixelWidth: wide\npixelHeight: 9"), None);
    }

    #[test]
    fn test_media_size_rejects_degenerate() {
        let zero = FixedProbe {
            width: 0.0,
            height: 720.0,
        };
        assert_eq!(media_size(&zero, Path::new("x")), DEFAULT_MEDIA_SIZE);
    }

    #[test]
    fn test_resolve_background_by_preferred_name() {
        let (_dir, paths) = home();
        let backgrounds = paths.documents.join("Backgrounds");
        fs::write(backgrounds.join("Waves.MOV"), b"v").unwrap();
        fs::write(backgrounds.join("notes.txt"), b"t").unwrap();

        let config = BackgroundMedia {
            preferred_file: Some("waves.mov".into()),
            ..Default::default()
        };
        let found = resolve_background(&config, Some(&backgrounds), &paths).unwrap();
        assert_eq!(found.file_name().unwrap(), "Waves.MOV");
        assert_eq!(background_candidates(&backgrounds).len(), 1);

        let missing = BackgroundMedia {
            file_path: Some("~/Documents/none.mov".into()),
            ..Default::default()
        };
        assert!(resolve_background(&missing, Some(&backgrounds), &paths).is_none());
    }

    #[test]
    fn test_background_action_defaults() {
        let (_dir, paths) = home();
        let file = paths.documents.join("Backgrounds/Sky Loop.mp4");
        fs::write(&file, b"v").unwrap();

        let mut ids = SequentialIds::new();
        let config = BackgroundMedia {
            duration_seconds: Some(42.0),
            playback_behavior: Some("bogus".into()),
            times_to_loop: Some(-2),
            ..Default::default()
        };
        let action = background_media_action(&mut ids, &file, &config, &paths, &FixedProbe::default());
        assert_eq!(action.name, "Sky Loop");
        assert_eq!(action.duration, 42.0);

        let media = media_of(&action);
        assert_eq!(media.layer_type(), LayerType::Background);
        let element = media.element.as_ref().unwrap();
        assert_eq!(element.metadata.as_ref().unwrap().format, "MP4");
        let url = element.url.as_ref().unwrap();
        assert!(url.absolute_string.ends_with("/Documents/Backgrounds/Sky%20Loop.mp4"));
        let local = url.local.as_ref().unwrap();
        assert_eq!(local.root(), LocalRoot::UserDocuments);
        assert_eq!(local.path, "Backgrounds/Sky Loop.mp4");

        let Some(TypeProperties::Video(video)) = &element.type_properties else {
            panic!("expected video properties");
        };
        let transport = video.transport.unwrap();
        assert_eq!(transport.playback_behavior(), PlaybackBehavior::Loop);
        assert_eq!(transport.times_to_loop, 1);
        assert_eq!(transport.out_point, 42.0);
        assert!(transport.should_fade_in && transport.should_fade_out);
        let props = video.video.unwrap();
        assert_eq!(props.frame_rate, 30.0);
        assert_eq!(props.soft_loop_duration, 0.5);
        assert_eq!(video.audio.unwrap().volume, 1.0);
        assert_eq!(video.drawing.unwrap().scale_behavior(), ScaleBehavior::Fill);
    }

    #[test]
    fn test_topic_media_outside_documents() {
        let (_dir, paths) = home();
        let file = paths.home.join("Pictures/welcome.png");
        fs::create_dir_all(file.parent().unwrap()).unwrap();
        fs::write(&file, b"p").unwrap();

        let mut ids = SequentialIds::new();
        let descriptor = MediaDescriptor {
            file_path: Some(file.to_string_lossy().into_owned()),
            ..Default::default()
        };
        let probe = FixedProbe {
            width: 800.0,
            height: 600.0,
        };
        let action = topic_media_action(&mut ids, &descriptor, &paths, &probe).unwrap();
        assert_eq!(action.name, "welcome.png");
        assert_eq!(action.label.as_ref().unwrap().text, "welcome.png");

        let media = media_of(&action);
        assert_eq!(media.layer_type(), LayerType::Foreground);
        let element = media.element.as_ref().unwrap();
        assert_eq!(element.metadata.as_ref().unwrap().format, "PNG");
        let local = element.url.as_ref().unwrap().local.as_ref().unwrap();
        assert_eq!(local.root(), LocalRoot::UserHome);
        assert_eq!(local.path, "Pictures/welcome.png");

        let Some(TypeProperties::Image(image)) = &element.type_properties else {
            panic!("expected image properties");
        };
        let drawing = image.drawing.unwrap();
        assert_eq!(drawing.scale_behavior(), ScaleBehavior::Fit);
        assert_eq!(drawing.natural_size.unwrap().width, 800.0);
        assert_eq!(
            image.file.as_ref().unwrap().local_url.as_ref(),
            element.url.as_ref()
        );
    }

    #[test]
    fn test_topic_media_requires_existing_file() {
        let (_dir, paths) = home();
        let mut ids = SequentialIds::new();
        let descriptor = MediaDescriptor {
            file_path: Some("~/missing.png".into()),
            format_hint: Some("png".into()),
            ..Default::default()
        };
        assert!(topic_media_action(&mut ids, &descriptor, &paths, &FixedProbe::default()).is_none());
        assert_eq!(ids.issued(), 0);
    }
}
