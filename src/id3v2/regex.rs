use regex::bytes::Regex;

pub fn frame_id() -> &'static Regex {
    lazy_static! {
        static ref RE: Regex = Regex::new(r"^[A-Z0-9]{4}$").unwrap();
    }
    &RE
}
