use super::*;
use crate::foundation::core::Rgba8;

fn cfg(width: u32, height: u32, fps: u32) -> EncodeConfig {
    EncodeConfig {
        width,
        height,
        fps,
        out_path: PathBuf::from("out/movie.mp4"),
        audio: None,
        overwrite: true,
    }
}

fn strings(args: Vec<OsString>) -> Vec<String> {
    args.into_iter()
        .map(|a| a.to_string_lossy().into_owned())
        .collect()
}

#[test]
fn config_validation_catches_bad_values() {
    assert!(cfg(0, 10, 30).validate().is_err());
    assert!(cfg(11, 10, 30).validate().is_err());
    assert!(cfg(10, 9, 30).validate().is_err());
    assert!(cfg(10, 10, 0).validate().is_err());
    assert!(cfg(10, 10, 30).validate().is_ok());
}

#[test]
fn missing_audio_file_is_rejected() {
    let c = cfg(10, 10, 30).with_audio("/definitely/not/here.wav");
    assert!(matches!(c.validate(), Err(FrameloomError::Validation(_))));
}

#[test]
fn image_sequence_args_without_audio() {
    let args = strings(image_sequence_args(
        &cfg(64, 32, 12),
        Path::new("frames/frame_%06d.png"),
        3,
        Path::new("out/movie.mp4"),
    ));
    assert_eq!(
        args,
        vec![
            "-y",
            "-loglevel",
            "error",
            "-framerate",
            "12",
            "-start_number",
            "0",
            "-i",
            "frames/frame_%06d.png",
            "-frames:v",
            "3",
            "-c:v",
            "libx264",
            "-pix_fmt",
            "yuv420p",
            "-an",
            "-movflags",
            "+faststart",
            "out/movie.mp4",
        ]
    );
}

#[test]
fn audio_is_muxed_with_shortest() {
    let mut c = cfg(64, 32, 12).with_audio("song.mp3");
    c.overwrite = false;
    let args = strings(image_sequence_args(
        &c,
        Path::new("f_%06d.png"),
        1,
        Path::new("o.mp4"),
    ));
    assert_eq!(args[0], "-n");
    let audio_at = args.iter().position(|a| a == "song.mp3").unwrap();
    assert_eq!(args[audio_at - 1], "-i");
    assert!(args.contains(&"-shortest".to_owned()));
    assert!(!args.contains(&"-an".to_owned()));
    assert_eq!(args.last().map(String::as_str), Some("o.mp4"));
}

#[test]
fn image_sequence_args_cap_frames_to_current_run() {
    let dir = tempfile::tempdir().unwrap();
    let mut frame_dir = FrameDir::new(dir.path()).unwrap();
    // Leftovers from an earlier run with more frames.
    for i in 0..5 {
        std::fs::write(frame_dir.frame_path(i), b"stale").unwrap();
    }
    let canvases = (0..2)
        .map(|_| Canvas::new(4, 4, Rgba8::black()).unwrap())
        .collect();
    let frames = CompiledFrames::from_canvases(10, Rgba8::black(), canvases).unwrap();
    frame_dir.write_frames(&frames).unwrap();

    let args = strings(image_sequence_args(
        &EncodeConfig::for_frames(&frames, "o.mp4"),
        &frame_dir.pattern(),
        frames.len(),
        Path::new("o.mp4"),
    ));
    let cap = args.iter().position(|a| a == "-frames:v").unwrap();
    assert_eq!(args[cap + 1], "2");
    let input = args.iter().position(|a| a == "-i").unwrap();
    assert!(cap > input, "frame cap must be an output option");
    assert!(frame_dir.frame_path(4).exists());
}

#[test]
fn pipe_args_describe_raw_rgba_input() {
    let args = strings(pipe_args(&cfg(64, 32, 25), Path::new("o.mp4")));
    let joined = args.join(" ");
    assert!(joined.contains("-f rawvideo -pix_fmt rgba -s 64x32 -r 25 -i pipe:0"));
    assert!(joined.ends_with("-movflags +faststart o.mp4"));
}

#[test]
fn for_frames_copies_geometry() {
    let canvas = Canvas::new(8, 6, Rgba8::black()).unwrap();
    let frames = CompiledFrames::from_canvases(24, Rgba8::black(), vec![canvas]).unwrap();
    let c = EncodeConfig::for_frames(&frames, "x.mp4");
    assert_eq!((c.width, c.height, c.fps), (8, 6, 24));
    assert!(c.overwrite);
    assert!(c.audio.is_none());
}

#[test]
fn size_mismatch_fails_before_spawning() {
    let canvas = Canvas::new(8, 6, Rgba8::black()).unwrap();
    let frames = CompiledFrames::from_canvases(24, Rgba8::black(), vec![canvas]).unwrap();
    let err = encode_piped(&frames, &cfg(16, 16, 24)).unwrap_err();
    assert!(matches!(err, FrameloomError::Validation(_)));
}

#[test]
fn flatten_canvas_is_opaque_over_background() {
    let canvas = Canvas::from_premul_rgba8(1, 1, vec![128, 0, 0, 128]).unwrap();
    let out = flatten_canvas(&canvas, [0, 0, 0, 255]).unwrap();
    assert_eq!(out, vec![128, 0, 0, 255]);
}

#[test]
fn ensure_parent_dir_creates_nested_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("a").join("b").join("movie.mp4");
    ensure_parent_dir(&out).unwrap();
    assert!(out.parent().unwrap().is_dir());
    ensure_parent_dir(Path::new("movie.mp4")).unwrap();
}
