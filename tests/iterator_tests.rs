use construct::{Buffer, FieldType};

fn numbered(n: usize) -> Buffer {
    let mut buffer = Buffer::with_types(n, &[FieldType::UInt32, FieldType::Char]).unwrap();
    for i in 0..n {
        buffer.set(i, 0, i as u32 * 10).unwrap();
        buffer.set(i, 1, -(i as i8)).unwrap();
    }
    buffer
}

#[test]
fn test_empty_buffer_iterator() {
    let buffer = Buffer::with_types(0, &[FieldType::UInt32]).unwrap();
    let mut iter = buffer.rows();

    assert!(iter.next().is_none());
    assert!(iter.next_back().is_none());
    assert_eq!(iter.len(), 0);
}

#[test]
fn test_rows_in_order() {
    let buffer = numbered(4);

    let keys: Vec<u32> = buffer.rows().map(|row| row.get::<u32>(0).unwrap()).collect();
    assert_eq!(keys, [0, 10, 20, 30]);

    let indices: Vec<usize> = buffer.rows().map(|row| row.index()).collect();
    assert_eq!(indices, [0, 1, 2, 3]);
}

#[test]
fn test_rows_reverse() {
    let buffer = numbered(3);

    let chars: Vec<i8> = buffer.rows().rev().map(|row| row.get::<i8>(1).unwrap()).collect();
    assert_eq!(chars, [-2, -1, 0]);
}

#[test]
fn test_rows_from_both_ends() {
    let buffer = numbered(5);
    let mut iter = buffer.rows();

    assert_eq!(iter.next().unwrap().index(), 0);
    assert_eq!(iter.next_back().unwrap().index(), 4);
    assert_eq!(iter.len(), 3);
    assert_eq!(iter.next().unwrap().index(), 1);
    assert_eq!(iter.next_back().unwrap().index(), 3);
    assert_eq!(iter.next().unwrap().index(), 2);
    assert!(iter.next().is_none());
    assert!(iter.next_back().is_none());
}

#[test]
fn test_size_hint() {
    let buffer = numbered(3);
    let mut iter = buffer.rows();

    assert_eq!(iter.size_hint(), (3, Some(3)));
    iter.next();
    assert_eq!(iter.size_hint(), (2, Some(2)));
}

#[test]
fn test_iterator_clone() {
    let buffer = numbered(3);
    let mut iter = buffer.rows();
    iter.next();

    let cloned = iter.clone();
    assert_eq!(iter.count(), 2);
    assert_eq!(cloned.count(), 2);
}

#[test]
fn test_for_loop_over_reference() {
    let buffer = numbered(3);
    let mut total = 0;
    for row in &buffer {
        total += row.get::<u32>(0).unwrap();
    }
    assert_eq!(total, 30);
}

#[test]
fn test_rows_do_not_touch_cursor() {
    let mut buffer = numbered(3);
    buffer.seek(1).unwrap();

    assert_eq!(buffer.rows().count(), 3);
    assert_eq!(buffer.cursor(), Some(1));
}

#[test]
fn test_row_field_bytes() {
    let buffer = numbered(2);
    let row = buffer.rows().nth(1).unwrap();

    assert_eq!(row.field_bytes(0).unwrap(), &10u32.to_ne_bytes());
    assert_eq!(row.field_bytes(1).unwrap(), &[(-1i8) as u8]);
}

#[test]
fn test_cursor_walk_visits_every_row_then_wraps() {
    let mut buffer = numbered(3);
    let mut seen = Vec::new();
    while buffer.advance() {
        seen.push(buffer.cursor().unwrap());
    }
    assert_eq!(seen, [0, 1, 2]);
    assert_eq!(buffer.cursor(), None);

    assert!(buffer.advance());
    assert_eq!(buffer.cursor(), Some(0));
}
