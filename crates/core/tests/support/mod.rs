#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Smallest complete class file declaring `class_name` (dot-delimited).
pub fn class_bytes(class_name: &str) -> Vec<u8> {
    let internal = class_name.replace('.', "/");
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&0xCAFE_BABEu32.to_be_bytes());
    bytes.extend_from_slice(&0u16.to_be_bytes()); // minor
    bytes.extend_from_slice(&52u16.to_be_bytes()); // major
    bytes.extend_from_slice(&3u16.to_be_bytes()); // constant_pool_count
    bytes.push(1);
    bytes.extend_from_slice(&(internal.len() as u16).to_be_bytes());
    bytes.extend_from_slice(internal.as_bytes());
    bytes.push(7);
    bytes.extend_from_slice(&1u16.to_be_bytes());
    bytes.extend_from_slice(&0x0021u16.to_be_bytes()); // access_flags
    bytes.extend_from_slice(&2u16.to_be_bytes()); // this_class
    bytes.extend_from_slice(&0u16.to_be_bytes()); // super_class
    bytes.extend_from_slice(&0u16.to_be_bytes()); // interfaces
    bytes.extend_from_slice(&0u16.to_be_bytes()); // fields
    bytes.extend_from_slice(&0u16.to_be_bytes()); // methods
    bytes.extend_from_slice(&0u16.to_be_bytes()); // attributes
    bytes
}

/// Class file whose constant pool carries one of every constant kind, a
/// string literal in modified UTF-8, and the name itself encoded the way
/// `javac` writes it.
pub fn rich_class_bytes(class_name: &str) -> Vec<u8> {
    fn utf8(bytes: &mut Vec<u8>, value: &[u8]) {
        bytes.push(1);
        bytes.extend_from_slice(&(value.len() as u16).to_be_bytes());
        bytes.extend_from_slice(value);
    }
    fn u2(bytes: &mut Vec<u8>, value: u16) {
        bytes.extend_from_slice(&value.to_be_bytes());
    }

    let internal = class_name.replace('.', "/");
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&0xCAFE_BABEu32.to_be_bytes());
    u2(&mut bytes, 0);
    u2(&mut bytes, 61);
    u2(&mut bytes, 23);
    utf8(&mut bytes, &cesu8::to_java_cesu8(&internal)); // #1
    bytes.push(7); // #2 Class
    u2(&mut bytes, 1);
    // #3 "\u{1F600}\0" as javac stores it
    utf8(&mut bytes, &[0xED, 0xA0, 0xBD, 0xED, 0xB8, 0x80, 0xC0, 0x80]);
    bytes.push(8); // #4 String
    u2(&mut bytes, 3);
    bytes.push(3); // #5 Integer
    bytes.extend_from_slice(&7i32.to_be_bytes());
    bytes.push(4); // #6 Float
    bytes.extend_from_slice(&1.5f32.to_be_bytes());
    bytes.push(5); // #7-#8 Long
    bytes.extend_from_slice(&(-1i64).to_be_bytes());
    bytes.push(6); // #9-#10 Double
    bytes.extend_from_slice(&2.5f64.to_be_bytes());
    utf8(&mut bytes, b"run"); // #11
    utf8(&mut bytes, b"()V"); // #12
    bytes.push(12); // #13 NameAndType
    u2(&mut bytes, 11);
    u2(&mut bytes, 12);
    for tag in [10u8, 9, 11] {
        // #14 Methodref, #15 Fieldref, #16 InterfaceMethodref
        bytes.push(tag);
        u2(&mut bytes, 2);
        u2(&mut bytes, 13);
    }
    bytes.extend_from_slice(&[15, 6]); // #17 MethodHandle, REF_invokeStatic
    u2(&mut bytes, 14);
    bytes.push(16); // #18 MethodType
    u2(&mut bytes, 12);
    for tag in [17u8, 18] {
        // #19 Dynamic, #20 InvokeDynamic
        bytes.push(tag);
        u2(&mut bytes, 0);
        u2(&mut bytes, 13);
    }
    bytes.push(19); // #21 Module
    u2(&mut bytes, 11);
    bytes.push(20); // #22 Package
    u2(&mut bytes, 11);
    u2(&mut bytes, 0x0021); // access_flags
    u2(&mut bytes, 2); // this_class
    for _ in 0..5 {
        // super_class, interfaces, fields, methods, attributes
        u2(&mut bytes, 0);
    }
    bytes
}

/// Archive entry name for a class, e.g. `a.B` -> `a/B.class`.
pub fn entry_name(class_name: &str) -> String {
    format!("{}.class", class_name.replace('.', "/"))
}

/// Entry for a well-formed class stored under its own name.
pub fn class_entry(class_name: &str) -> (String, Vec<u8>) {
    (entry_name(class_name), class_bytes(class_name))
}

/// Write an uncompressed jar with the given entries, in the given order.
pub fn write_jar(path: &Path, entries: &[(String, Vec<u8>)]) {
    let file = File::create(path).expect("create jar");
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    for (name, bytes) in entries {
        writer.start_file(name.as_str(), options).expect("start entry");
        writer.write_all(bytes).expect("write entry");
    }
    writer.finish().expect("finish jar");
}

/// Jar in `dir` containing one well-formed class per name.
pub fn jar_with_classes(dir: &Path, file_name: &str, class_names: &[&str]) -> PathBuf {
    let path = dir.join(file_name);
    let entries: Vec<(String, Vec<u8>)> = class_names.iter().map(|n| class_entry(n)).collect();
    write_jar(&path, &entries);
    path
}
