use super::*;

#[test]
fn frame_range_rejects_inverted_bounds() {
    let err = FrameRange::new(FrameIndex(5), FrameIndex(2)).unwrap_err();
    assert!(matches!(err, FramecastError::InvalidConfig(_)));
}

#[test]
fn chunks_cover_range_without_gaps() {
    let r = FrameRange::new(FrameIndex(3), FrameIndex(13)).unwrap();
    let chunks: Vec<_> = r.chunks(4).collect();
    assert_eq!(chunks.len(), 3);
    assert_eq!(chunks[0].start, FrameIndex(3));
    assert_eq!(chunks[2].end, FrameIndex(13));
    for w in chunks.windows(2) {
        assert_eq!(w[0].end, w[1].start);
    }
    assert_eq!(chunks.iter().map(|c| c.len_frames()).sum::<u64>(), 10);
}

#[test]
fn fps_rejects_zero_parts() {
    assert!(matches!(
        Fps::new(0, 1).unwrap_err(),
        FramecastError::InvalidConfig(_)
    ));
    assert!(matches!(
        Fps::new(30, 0).unwrap_err(),
        FramecastError::InvalidConfig(_)
    ));
}

#[test]
fn secs_to_frames_rounds_half_up() {
    let fps = Fps::new(30, 1).unwrap();
    assert_eq!(fps.secs_to_frames_round(7.0), 210);
    assert_eq!(fps.secs_to_frames_round(0.6), 18);
    assert_eq!(fps.secs_to_frames_round(1.3), 39);
    assert_eq!(fps.secs_to_frames_round(-1.0), 0);

    let ntsc = Fps::new(30000, 1001).unwrap();
    assert_eq!(ntsc.secs_to_frames_round(123.0 * 1001.0 / 30000.0), 123);
}

#[test]
fn fps_deserializes_from_number_or_ratio() {
    let a: Fps = serde_json::from_str("30").unwrap();
    assert_eq!(a, Fps::new(30, 1).unwrap());
    let b: Fps = serde_json::from_str(r#"{ "num": 30000, "den": 1001 }"#).unwrap();
    assert_eq!(b, Fps::new(30000, 1001).unwrap());
    assert!(serde_json::from_str::<Fps>("0").is_err());
}

#[test]
fn fps_accepts_decimal_rates() {
    let ntsc: Fps = serde_json::from_str("29.97").unwrap();
    assert_eq!(ntsc, Fps::new(2997, 100).unwrap());
    assert!((ntsc.as_f64() - 29.97).abs() < 1e-12);

    let whole: Fps = serde_json::from_str("30.0").unwrap();
    assert_eq!(whole, Fps::new(30, 1).unwrap());
    assert_eq!(Fps::from_f64(23.976).unwrap(), Fps::new(2997, 125).unwrap());

    for bad in ["-30", "0.0", "-29.97", "0.0001"] {
        assert!(serde_json::from_str::<Fps>(bad).is_err(), "{bad}");
    }
    for bad in [f64::NAN, f64::INFINITY, 1e12] {
        assert!(matches!(
            Fps::from_f64(bad).unwrap_err(),
            FramecastError::InvalidConfig(_)
        ));
    }
}
