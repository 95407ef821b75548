use super::*;

#[derive(Default)]
struct Bytes(Vec<u8>);

impl Bytes {
    fn i8(mut self, v: i8) -> Self {
        self.0.extend_from_slice(&v.to_le_bytes());
        self
    }
    fn i32(mut self, v: i32) -> Self {
        self.0.extend_from_slice(&v.to_le_bytes());
        self
    }
    fn f32(mut self, v: f32) -> Self {
        self.0.extend_from_slice(&v.to_le_bytes());
        self
    }
    fn string(mut self, s: &str) -> Self {
        self.0
            .extend_from_slice(&(s.len() as i32 + 1).to_le_bytes());
        self.0.extend_from_slice(s.as_bytes());
        self.0.push(0);
        self
    }
}

#[test]
fn primitives_read_little_endian() {
    let b = Bytes::default()
        .i8(-3)
        .i32(0x0102_0304)
        .f32(1.5)
        .i8(1)
        .0;
    let mut d = Deserializer::new(&b);
    assert_eq!(d.read_i8().unwrap(), -3);
    assert_eq!(d.read_i32().unwrap(), 0x0102_0304);
    assert_eq!(d.read_f32().unwrap(), 1.5);
    assert!(d.read_bool().unwrap());
    assert_eq!(d.remaining(), 0);
    d.finish().unwrap();
}

#[test]
fn i64_reads_eight_bytes() {
    let b = (-42i64).to_le_bytes();
    let mut d = Deserializer::new(&b);
    assert_eq!(d.read_i64().unwrap(), -42);
    assert_eq!(d.position(), 8);
}

#[test]
fn string_drops_trailing_nul() {
    let b = Bytes::default().string("héllo").0;
    let mut d = Deserializer::new(&b);
    assert_eq!(d.read_string().unwrap(), "héllo");
    assert_eq!(d.remaining(), 0);
}

#[test]
fn zero_length_string_is_empty() {
    let b = Bytes::default().i32(0).0;
    let mut d = Deserializer::new(&b);
    assert_eq!(d.read_string().unwrap(), "");
}

#[test]
fn invalid_utf8_is_a_decode_error() {
    let b = Bytes::default().i32(3).i8(-1).i8(-2).i8(0).0;
    let err = Deserializer::new(&b).read_string().unwrap_err();
    assert!(err.is_decode());
}

#[test]
fn tagged_numbers() {
    let b = Bytes::default()
        .i8(102)
        .i32(-7)
        .i8(103)
        .f32(0.25)
        .0;
    let mut d = Deserializer::new(&b);
    assert_eq!(d.read_number().unwrap(), -7.0);
    assert_eq!(d.read_number().unwrap(), 0.25);
}

#[test]
fn unknown_number_tag_fails_at_tag_offset() {
    let b = Bytes::default().i8(1).i8(99).i32(0).0;
    let mut d = Deserializer::new(&b);
    d.read_i8().unwrap();
    match d.read_number().unwrap_err() {
        MockError::Decode { offset, .. } => assert_eq!(offset, 1),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn optional_absent_consumes_only_the_tag() {
    let b = Bytes::default().i8(5).i32(77).0;
    let mut d = Deserializer::new(&b);
    let v = d.read_optional(|d| d.read_i32()).unwrap();
    assert_eq!(v, None);
    assert_eq!(d.position(), 1);
    assert_eq!(d.read_i32().unwrap(), 77);
}

#[test]
fn optional_present_reads_payload_after_any_other_tag() {
    let b = Bytes::default().i8(2).string("x").i8(3).i32(9).0;
    let mut d = Deserializer::new(&b);
    assert_eq!(
        d.read_optional(|d| d.read_string()).unwrap().as_deref(),
        Some("x")
    );
    assert_eq!(d.read_optional(|d| d.read_i32()).unwrap(), Some(9));
    d.finish().unwrap();
}

#[test]
fn union_dispatches_on_selector() {
    let b = Bytes::default().i8(1).string("two").0;
    let mut d = Deserializer::new(&b);
    let v = d
        .read_union(2, |d, sel| match sel {
            0 => d.read_i32().map(|n| n.to_string()),
            _ => d.read_string(),
        })
        .unwrap();
    assert_eq!(v, "two");
}

#[test]
fn out_of_range_selector_is_fatal() {
    for sel in [2i8, -1, 127] {
        let b = Bytes::default().i8(sel).i32(0).0;
        let mut d = Deserializer::new(&b);
        let err = d.read_union(2, |d, _| d.read_i32()).unwrap_err();
        assert!(err.to_string().contains("out of range"), "{err}");
    }
}

#[test]
fn arrays_read_count_then_elements() {
    let b = Bytes::default().i32(3).i32(10).i32(20).i32(30).0;
    let mut d = Deserializer::new(&b);
    assert_eq!(d.read_array(|d| d.read_i32()).unwrap(), vec![10, 20, 30]);
}

#[test]
fn negative_array_length_is_rejected() {
    let b = Bytes::default().i32(-1).0;
    let err = Deserializer::new(&b)
        .read_array(|d| d.read_i8())
        .unwrap_err();
    assert!(err.to_string().contains("negative array length"));
}

#[test]
fn array_count_beyond_remaining_bytes_is_rejected() {
    let b = Bytes::default().i32(i32::MAX).i8(1).i8(2).0;
    let mut d = Deserializer::new(&b);
    match d.read_array(|d| d.read_i8()).unwrap_err() {
        MockError::Decode { offset, message } => {
            assert_eq!(offset, 0);
            assert!(message.contains("exceeds 2 remaining bytes"), "{message}");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn truncated_buffer_reports_position() {
    let b = Bytes::default().i32(2).i32(1).0;
    let err = Deserializer::new(&b)
        .read_array(|d| d.read_i32())
        .unwrap_err();
    match err {
        MockError::Decode { offset, message } => {
            assert_eq!(offset, 8);
            assert!(message.contains("need 4 bytes"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn finish_rejects_trailing_bytes() {
    let b = Bytes::default().i8(1).i8(2).0;
    let mut d = Deserializer::new(&b);
    d.read_i8().unwrap();
    assert!(d.finish().is_err());
}

#[test]
fn runtime_type_tags_round_trip() {
    for raw in [-1i8, 1, 2, 3, 4, 5, 6, 7, 8, 9] {
        let t = RuntimeType::from_i8(raw).unwrap();
        assert_eq!(t.as_i8(), raw);
    }
    assert!(RuntimeType::from_i8(0).is_none());
    let b = [42u8];
    assert!(Deserializer::new(&b).read_runtime_type().is_err());
}
