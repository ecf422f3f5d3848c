use construct::{Buffer, FieldType, SchemaStack};

#[test]
fn test_stack_initialization() {
    let stack = SchemaStack::new();

    assert_eq!(stack.len(), 0);
    assert!(stack.is_empty());
    assert!(stack.types().is_empty());
}

#[test]
fn test_stack_push_operations() {
    let mut stack = SchemaStack::new();

    stack.push(FieldType::UInt32);
    assert_eq!(stack.len(), 1);
    assert!(!stack.is_empty());

    stack.push(FieldType::Float32);
    stack.push(FieldType::Char);
    assert_eq!(stack.len(), 3);

    // Bottom of the stack is the first field of the row
    assert_eq!(
        stack.types(),
        &[FieldType::UInt32, FieldType::Float32, FieldType::Char]
    );
}

#[test]
fn test_stack_pop_trailing_types() {
    let mut stack = SchemaStack::new();
    stack.push(FieldType::UInt32);
    stack.push(FieldType::Int32);
    stack.push(FieldType::UChar);

    stack.pop(2).unwrap();
    assert_eq!(stack.types(), &[FieldType::UInt32]);

    stack.pop(0).unwrap();
    assert_eq!(stack.len(), 1);

    stack.pop(1).unwrap();
    assert!(stack.is_empty());
}

#[test]
fn test_stack_flush() {
    let mut stack = SchemaStack::new();
    stack.push(FieldType::Pointer);
    stack.push(FieldType::Pointer);

    stack.flush().unwrap();
    assert!(stack.is_empty());
}

#[test]
fn test_stack_has_no_upper_bound() {
    let mut stack = SchemaStack::new();
    for _ in 0..1000 {
        stack.push(FieldType::UChar);
    }
    assert_eq!(stack.len(), 1000);

    let buffer = Buffer::from_stack(&mut stack, 2).unwrap();
    assert_eq!(buffer.stride(), 1000);
    assert_eq!(buffer.byte_len(), 2000);
}

#[test]
fn test_create_drains_stack() {
    let mut stack = SchemaStack::new();
    stack.push(FieldType::UInt32);
    stack.push(FieldType::Float32);

    let buffer = Buffer::from_stack(&mut stack, 3).unwrap();

    assert!(stack.is_empty());
    assert_eq!(buffer.len(), 3);
    assert_eq!(buffer.schema().types(), &[FieldType::UInt32, FieldType::Float32]);
}

#[test]
fn test_stack_reusable_after_create() {
    let mut stack = SchemaStack::new();
    stack.push(FieldType::UInt32);
    let first = Buffer::from_stack(&mut stack, 1).unwrap();

    stack.push(FieldType::UChar);
    stack.push(FieldType::UChar);
    let second = Buffer::from_stack(&mut stack, 1).unwrap();

    assert_eq!(first.stride(), 4);
    assert_eq!(second.stride(), 2);
}

#[test]
fn test_repush_copies_layout() {
    let source = Buffer::with_types(5, &[FieldType::Int32, FieldType::Char]).unwrap();

    let mut stack = SchemaStack::new();
    stack.repush(source.schema());
    stack.push(FieldType::Float32);

    let derived = Buffer::from_stack(&mut stack, 1).unwrap();
    assert_eq!(
        derived.schema().types(),
        &[FieldType::Int32, FieldType::Char, FieldType::Float32]
    );
}

#[test]
fn test_repush_then_create_gives_identical_schema() {
    let source = Buffer::with_types(2, &[FieldType::UChar, FieldType::UInt32]).unwrap();

    let mut stack = SchemaStack::new();
    stack.repush(source.schema());
    let twin = Buffer::from_stack(&mut stack, 7).unwrap();

    assert_eq!(twin.schema(), source.schema());
    assert_eq!(twin.len(), 7);
}
