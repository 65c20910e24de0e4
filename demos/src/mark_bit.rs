#[cfg(test)]
mod examples {
    use tagged_ptr::{Reject, TagValue, TaggedPtr};

    struct Entry {
        key: u32,
        next: Link,
    }

    // Two tag bits whatever the alignment of `Entry` is.
    type Link = TaggedPtr<Entry, Reject, 4>;

    const DELETED: usize = 0b01;
    const PINNED: usize = 0b10;

    fn push(next: Link, key: u32) -> Link {
        Link::try_new(Box::into_raw(Box::new(Entry { key, next })), 0).unwrap()
    }

    fn free(mut head: Link) {
        while !head.is_null() {
            let entry = unsafe { Box::from_raw(head.pointer()) };
            head = entry.next;
        }
    }

    fn mark(link: &mut Link, bits: usize) {
        *link |= TagValue::new(bits).unwrap();
    }

    #[test]
    fn logical_deletion() {
        let third = push(Link::null(), 3);
        let second = push(third, 2);
        let first = push(second, 1);

        // Marking `second` deleted keeps the link to its successor intact.
        mark(unsafe { &mut (*second.pointer()).next }, DELETED);
        assert_eq!(unsafe { second.as_ref() }.map(|e| e.next), Some(third));

        let mut keys = Vec::new();
        let mut current = first;
        while let Some(entry) = unsafe { current.as_ref() } {
            if entry.next.tag() & DELETED == 0 {
                keys.push(entry.key);
            }
            current = entry.next;
        }
        assert_eq!(keys, [1, 3]);

        free(first);
    }

    #[test]
    fn pin_and_unmark() {
        let entry = push(Link::null(), 8);
        let mut link = entry;
        mark(&mut link, DELETED | PINNED);
        assert_eq!(link.tag(), DELETED | PINNED);

        link &= TagValue::new(PINNED).unwrap();
        assert_eq!(link.tag(), PINNED);
        assert_eq!(link, entry);
        assert_eq!(unsafe { link.as_ref() }.map(|e| e.key), Some(8));

        assert_eq!(link.unset_tag(), PINNED);
        assert!(TagValue::<Entry, Reject, 4>::new(0b100).is_err());

        free(link);
    }
}
