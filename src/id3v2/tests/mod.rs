
use std::io::{self, Cursor, Write};

use proptest::prelude::*;

use crate::id3v2::tools::{decode_size, encode_size};
use crate::id3v2::{FrameReader, Rewrite, HEADER_SIZE};
use crate::{Error, FrameKind};

const HEADER: &[u8; 10] = b"ID3\x03\x00\x00\x00\x00\x02\x01";
const AUDIO: &[u8] = b"\xFF\xFB\x90\x64\x00\x00\x00\x00\x12\x34\x56\x78";

// id, size, two flag bytes, encoding byte, payload
fn frame(id: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut vec = id.to_vec();
    vec.extend_from_slice(&encode_size(payload.len() as u32 + 1));
    vec.extend_from_slice(b"\x00\x00\x00");
    vec.extend_from_slice(payload);
    vec
}

fn tag(frames: &[Vec<u8>], trailer: &[u8]) -> Vec<u8> {
    let mut vec = HEADER.to_vec();
    for f in frames {
        vec.extend_from_slice(f);
    }
    vec.extend_from_slice(trailer);
    vec
}

fn sample() -> Vec<u8> {
    tag(
        &[
            frame(b"TIT2", b"Test Name"),
            frame(b"TPE1", b"Test Artist"),
            frame(b"TRCK", b"7/16"),
            frame(b"TALB", b"Test Album"),
            frame(b"COMM", b"eng\x00Test Comments"),
        ],
        AUDIO,
    )
}

fn view(data: &[u8]) -> Result<Vec<(FrameKind, u32, Vec<u8>)>, Error> {
    let tags = super::get(&mut Cursor::new(data), 8)?;
    Ok(tags
        .into_frames()
        .into_iter()
        .map(|f| (f.kind, f.size, f.payload))
        .collect())
}

fn rewrite(data: &[u8], target: FrameKind, payload: &[u8]) -> Result<(Vec<u8>, Rewrite), Error> {
    let mut output = Vec::new();
    let outcome = super::rewrite(&mut Cursor::new(data), &mut output, target, payload)?;
    Ok((output, outcome))
}

// accepts `room` bytes, then the disk is full
struct FullDisk {
    room: usize,
}

impl Write for FullDisk {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.room == 0 {
            return Err(io::Error::new(io::ErrorKind::Other, "no space left"));
        }
        let n = buf.len().min(self.room);
        self.room -= n;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn read_test() {
    let frames = view(&sample()).unwrap();
    assert_eq!(
        frames,
        vec![
            (FrameKind::Title, 10, b"Test Name".to_vec()),
            (FrameKind::Artist, 12, b"Test Artist".to_vec()),
            (FrameKind::Album, 11, b"Test Album".to_vec()),
            (FrameKind::Comment, 18, b"eng\x00Test Comments".to_vec()),
        ]
    );
}

#[test]
fn read_text_test() {
    let data = tag(&[frame(b"TCON", b"Chanson fran\xe7aise\x00")], b"");
    let tags = super::get(&mut Cursor::new(&data), 8).unwrap();
    let genre = tags.get(FrameKind::Genre).unwrap();
    assert_eq!(genre.text(), "Chanson française");
    assert_eq!(genre.id(), b"TCON");
    assert!(tags.get(FrameKind::Year).is_none());
}

#[test]
fn read_is_repeatable_test() {
    let data = sample();
    assert_eq!(view(&data).unwrap(), view(&data).unwrap());
}

#[test]
fn read_skips_unknown_frames_test() {
    let big = vec![0xAB; 3000];
    let data = tag(
        &[
            frame(b"APIC", &big),
            frame(b"TXXX", b"whatever"),
            frame(b"TYER", b"2008"),
        ],
        AUDIO,
    );
    assert_eq!(view(&data).unwrap(), vec![(FrameKind::Year, 5, b"2008".to_vec())]);
}

#[test]
fn read_limit_test() {
    let frames: Vec<Vec<u8>> = (0..10)
        .map(|i| frame(b"COMM", format!("comment {}", i).as_bytes()))
        .collect();
    let data = tag(&frames, b"");

    let all = view(&data).unwrap();
    assert_eq!(all.len(), 8);
    assert_eq!(all[7].2, b"comment 7".to_vec());

    let mut input = Cursor::new(&data);
    input.set_position(HEADER_SIZE as u64);
    let mut reader = FrameReader::new(&mut input, data.len() as u64).with_limit(2);
    assert!(reader.next().unwrap().is_ok());
    assert!(reader.next().unwrap().is_ok());
    assert!(reader.next().is_none());
    assert_eq!(reader.position(), (HEADER_SIZE + 2 * frames[0].len()) as u64);
}

#[test]
fn read_stops_at_padding_test() {
    let mut trailer = vec![0; 64];
    trailer.extend_from_slice(AUDIO);
    let data = tag(&[frame(b"TIT2", b"Padded")], &trailer);
    assert_eq!(view(&data).unwrap(), vec![(FrameKind::Title, 7, b"Padded".to_vec())]);
}

#[test]
fn read_empty_tag_test() {
    assert!(view(HEADER).unwrap().is_empty());
}

#[test]
fn read_truncated_test() {
    let data = sample();

    // inside the first payload
    let cut = &data[..HEADER_SIZE + 15];
    assert!(matches!(view(cut), Err(Error::TruncatedStream { .. })));

    // inside the second frame header
    let cut = &data[..HEADER_SIZE + frame(b"TIT2", b"Test Name").len() + 6];
    assert!(matches!(view(cut), Err(Error::TruncatedStream { .. })));

    // inside an unknown frame being skipped
    let data = tag(&[frame(b"TXXX", b"0123456789")], b"");
    assert!(matches!(
        view(&data[..data.len() - 3]),
        Err(Error::TruncatedStream { .. })
    ));

    // no room for the tag header
    assert!(matches!(
        view(&HEADER[..4]),
        Err(Error::TruncatedStream { offset: 0, .. })
    ));
}

#[test]
fn read_bogus_size_test() {
    let mut data = HEADER.to_vec();
    data.extend_from_slice(b"TIT2\xFF\xFF\xFF\xF0\x00\x00\x00abc");
    assert!(matches!(view(&data), Err(Error::TruncatedStream { .. })));
}

#[test]
fn read_zero_size_test() {
    let mut data = HEADER.to_vec();
    data.extend_from_slice(b"TIT2\x00\x00\x00\x00\x00\x00");
    data.extend_from_slice(AUDIO);
    assert!(matches!(view(&data), Err(Error::FrameSize { .. })));
}

#[test]
fn rewrite_minimal_test() {
    let mut data = vec![0; 10];
    data.extend_from_slice(&frame(b"TIT2", b"Test"));
    data.extend_from_slice(AUDIO);

    let (output, outcome) = rewrite(&data, FrameKind::Title, b"Song").unwrap();
    assert_eq!(
        outcome,
        Rewrite::Replaced {
            old_size: 5,
            new_size: 5
        }
    );

    let mut expected = vec![0; 10];
    expected.extend_from_slice(b"TIT2\x00\x00\x00\x05\x00\x00\x00Song");
    expected.extend_from_slice(AUDIO);
    assert_eq!(output, expected);

    let mut size = [0; 4];
    size.copy_from_slice(&output[14..18]);
    assert_eq!(decode_size(size), 5);
}

#[test]
fn rewrite_preserves_structure_test() {
    let title = frame(b"TIT2", b"Test Name");
    let artist = frame(b"TPE1", b"Test Artist");
    let rest = [
        frame(b"TRCK", b"7/16"),
        frame(b"TALB", b"Test Album"),
        frame(b"COMM", b"eng\x00Test Comments"),
    ];
    let data = sample();

    let (output, outcome) =
        rewrite(&data, FrameKind::Artist, b"A considerably longer artist name").unwrap();
    assert_eq!(
        outcome,
        Rewrite::Replaced {
            old_size: 12,
            new_size: 34
        }
    );

    let prefix = HEADER.len() + title.len();
    assert_eq!(&output[..prefix], &data[..prefix]);

    let new_artist = frame(b"TPE1", b"A considerably longer artist name");
    assert_eq!(&output[prefix..prefix + new_artist.len()], &new_artist[..]);

    let suffix = &data[prefix + artist.len()..];
    assert_eq!(&output[prefix + new_artist.len()..], suffix);
    assert!(suffix.starts_with(&rest[0]));

    let frames = view(&output).unwrap();
    assert_eq!(frames[1], (FrameKind::Artist, 34, b"A considerably longer artist name".to_vec()));
    assert_eq!(frames[2].2, b"Test Album".to_vec());
}

#[test]
fn rewrite_keeps_flags_and_encoding_test() {
    let mut data = HEADER.to_vec();
    data.extend_from_slice(b"TALB\x00\x00\x00\x04\x40\x02\x03old");
    data.extend_from_slice(AUDIO);

    let (output, _) = rewrite(&data, FrameKind::Album, b"new!").unwrap();
    let mut expected = HEADER.to_vec();
    expected.extend_from_slice(b"TALB\x00\x00\x00\x05\x40\x02\x03new!");
    expected.extend_from_slice(AUDIO);
    assert_eq!(output, expected);
}

#[test]
fn rewrite_first_match_only_test() {
    let data = tag(
        &[frame(b"COMM", b"first"), frame(b"COMM", b"second")],
        AUDIO,
    );
    let (output, _) = rewrite(&data, FrameKind::Comment, b"changed").unwrap();
    assert_eq!(
        output,
        tag(&[frame(b"COMM", b"changed"), frame(b"COMM", b"second")], AUDIO)
    );
}

#[test]
fn rewrite_missing_frame_test() {
    let data = sample();
    let (output, outcome) = rewrite(&data, FrameKind::Composer, b"Nobody").unwrap();
    assert_eq!(outcome, Rewrite::Unchanged);
    assert_eq!(output, data);

    // frames running right up to the end of the file
    let data = tag(&[frame(b"TIT2", b"Only")], b"");
    let (output, outcome) = rewrite(&data, FrameKind::Year, b"1999").unwrap();
    assert_eq!(outcome, Rewrite::Unchanged);
    assert_eq!(output, data);
}

#[test]
fn rewrite_truncated_test() {
    let data = sample();
    let title = frame(b"TIT2", b"Test Name").len();

    // before the target
    let cut = &data[..HEADER_SIZE + title - 2];
    assert!(matches!(
        rewrite(cut, FrameKind::Album, b"x"),
        Err(Error::TruncatedStream { .. })
    ));

    // inside the target itself
    let cut = &data[..HEADER_SIZE + title + 13];
    assert!(matches!(
        rewrite(cut, FrameKind::Artist, b"x"),
        Err(Error::TruncatedStream { .. })
    ));

    // half a frame id
    let cut = &data[..HEADER_SIZE + title + 2];
    assert!(matches!(
        rewrite(cut, FrameKind::Album, b"x"),
        Err(Error::TruncatedStream { .. })
    ));

    assert!(matches!(
        rewrite(&HEADER[..9], FrameKind::Title, b"x"),
        Err(Error::TruncatedStream { offset: 0, .. })
    ));
}

#[test]
fn rewrite_zero_size_target_test() {
    let mut data = HEADER.to_vec();
    data.extend_from_slice(b"TYER\x00\x00\x00\x00\x00\x00");
    data.extend_from_slice(AUDIO);
    assert!(matches!(
        rewrite(&data, FrameKind::Year, b"2020"),
        Err(Error::FrameSize { .. })
    ));
}

#[test]
fn rewrite_write_failure_test() {
    let data = sample();
    for room in [0, 5, 10, 40, data.len() - 1].iter() {
        let mut output = FullDisk { room: *room };
        let result = super::rewrite(
            &mut Cursor::new(&data),
            &mut output,
            FrameKind::Album,
            b"Another Album",
        );
        assert!(
            matches!(result, Err(Error::WriteFailure(_))),
            "room {}: {:?}",
            room,
            result
        );
    }
}

proptest! {
    #[test]
    fn prop_rewrite_touches_only_target(
        before in proptest::collection::vec(any::<u8>(), 0..64),
        old in proptest::collection::vec(any::<u8>(), 0..64),
        new in proptest::collection::vec(any::<u8>(), 0..64),
        trailer in proptest::collection::vec(any::<u8>(), 0..64),
    ) {
        let lead = frame(b"TXXX", &before);
        let target = frame(b"TCOM", &old);
        let mut tail = frame(b"TPE1", b"after");
        tail.extend_from_slice(&trailer);

        let data = tag(&[lead.clone(), target], &tail);
        let (output, outcome) = rewrite(&data, FrameKind::Composer, &new).unwrap();

        prop_assert_eq!(
            outcome,
            Rewrite::Replaced { old_size: old.len() as u32 + 1, new_size: new.len() as u32 + 1 }
        );
        prop_assert_eq!(output, tag(&[lead, frame(b"TCOM", &new)], &tail));
    }
}
