#[cfg(test)]
mod examples {
    use tagged_ptr::{Assert, Clamp, Ignore, Reject, TagOutOfRange, TaggedPtr};

    #[repr(align(16))]
    struct Page([u8; 16]);

    #[test]
    fn out_of_range() {
        let mut page = Page([0; 16]);
        let raw: *mut Page = &mut page;

        let clamp: TaggedPtr<Page, Clamp> = TaggedPtr::new(raw, 0x1f);
        assert_eq!(clamp.get(), (raw, 0xf));

        let ignore: TaggedPtr<Page, Ignore> = TaggedPtr::new(raw, 0xf);
        assert_eq!(ignore.get(), (raw, 0xf));

        let reject = TaggedPtr::<Page, Reject>::try_new(raw, 0x1f);
        assert_eq!(reject, Err(TagOutOfRange::new(0x1f, 0xf)));
        assert_eq!(
            reject.map_err(|e| e.to_string()),
            Err(String::from("tag value 31 outside of alignment range 0..=15"))
        );

        let asserted: TaggedPtr<Page, Assert> = TaggedPtr::new(raw, 0xe);
        assert_eq!(asserted, clamp);
    }

    #[test]
    fn narrower_tag_space() {
        let mut page = Page([0; 16]);
        let raw: *mut Page = &mut page;

        let two_bits: TaggedPtr<Page, Clamp, 4> = TaggedPtr::new(raw, 0xf);
        assert_eq!(two_bits.tag(), 0b11);
        assert_eq!(TaggedPtr::<Page, Clamp, 4>::BITS, 2);

        let widened: TaggedPtr<Page, Reject> = two_bits.convert();
        assert_eq!(widened.get(), two_bits.get());
        assert_eq!(unsafe { widened.as_ref() }.map(|p| p.0.len()), Some(16));
    }
}
