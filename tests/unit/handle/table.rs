use super::*;

#[test]
fn reserved_slots_hold_null_and_finalizer() {
    let t = HandleTable::new();
    assert!(t.resolve::<String>(Handle::NULL).is_none());
    assert!(t.resolve::<ReleaseFinalizer>(Handle::NULL).is_none());
    assert!(t.resolve::<ReleaseFinalizer>(Handle::FINALIZER).is_some());
    assert_eq!(t.finalizer().raw(), 1);
    assert_eq!(t.live_count(), 1);
}

#[test]
fn allocate_none_returns_null_without_a_slot() {
    let mut t = HandleTable::new();
    let h = t.allocate_opt::<String>(None);
    assert!(h.is_null());
    assert_eq!(t.live_count(), 1);
    let next = t.allocate(5u8);
    assert_eq!(next.raw(), 2);
}

#[test]
fn allocate_resolve_release_cycle() {
    let mut t = HandleTable::new();
    let h = t.allocate("hello".to_string());
    assert!(h.raw() >= 2);
    assert_eq!(t.resolve::<String>(h).map(String::as_str), Some("hello"));
    assert!(t.resolve::<u32>(h).is_none(), "wrong type resolves to nothing");

    let boxed = t.release(h).unwrap();
    assert_eq!(*boxed.downcast::<String>().unwrap(), "hello");
    assert!(t.resolve::<String>(h).is_none());
    assert!(!t.is_live(h));
}

#[test]
fn stale_handle_does_not_alias_recycled_slot() {
    let mut t = HandleTable::new();
    let a = t.allocate(1u32);
    t.release(a);
    let b = t.allocate(2u32);
    assert_eq!(a.index(), b.index());
    assert_ne!(a, b);
    assert!(t.resolve::<u32>(a).is_none());
    assert_eq!(t.resolve::<u32>(b), Some(&2));
    assert!(t.release(a).is_none(), "stale release is a no-op");
    assert_eq!(t.resolve::<u32>(b), Some(&2));
}

#[test]
fn reserved_handles_cannot_be_released() {
    let mut t = HandleTable::new();
    assert!(t.release(Handle::NULL).is_none());
    assert!(t.release(Handle::FINALIZER).is_none());
    assert!(t.resolve::<ReleaseFinalizer>(Handle::FINALIZER).is_some());
    let h = t.allocate(0i64);
    assert!(h.index() >= 2);
}

#[test]
fn finalizer_releases_target() {
    let mut t = HandleTable::new();
    let h = t.allocate(vec![1u8, 2, 3]);
    let fin = t.finalizer();
    assert!(t.invoke_finalizer(fin, h).is_some());
    assert!(t.resolve::<Vec<u8>>(h).is_none());
}

#[test]
fn non_finalizer_handle_is_a_soft_miss() {
    let mut t = HandleTable::new();
    let victim = t.allocate(3u8);
    let bogus = t.allocate(4u8);
    assert!(t.invoke_finalizer(bogus, victim).is_none());
    assert_eq!(t.resolve::<u8>(victim), Some(&3));
}

#[test]
fn out_of_range_handle_resolves_to_none() {
    let mut t = HandleTable::new();
    let far = Handle::from_raw(9_999);
    assert!(t.resolve::<u8>(far).is_none());
    assert!(t.resolve_mut::<u8>(far).is_none());
    assert!(t.release(far).is_none());
}

#[test]
fn resolve_mut_updates_in_place() {
    let mut t = HandleTable::new();
    let h = t.allocate(String::from("a"));
    t.resolve_mut::<String>(h).unwrap().push('b');
    assert_eq!(t.resolve::<String>(h).unwrap(), "ab");
}
