use bytes::Bytes;
use half::f16;
use mpack::{float::Float, integer::Integer, vecmap::VecMap, Value};
use proptest::prelude::*;

/// arbitrary Integer for use with proptest
pub fn arb_integer() -> impl Strategy<Value = Integer> {
    prop_oneof![
        // boundaries of every wire form
        prop::sample::select(vec![
            0u64,
            0x7f,
            0x80,
            0xff,
            0x100,
            0xffff,
            0x1_0000,
            0xffff_ffff,
            0x1_0000_0000,
            u64::max_value(),
        ])
        .prop_map(Integer::from),
        prop::sample::select(vec![
            -1i64,
            -32,
            -33,
            -128,
            -129,
            -32768,
            -32769,
            -2_147_483_648,
            -2_147_483_649,
            i64::min_value(),
        ])
        .prop_map(Integer::from),
        any::<u8>().prop_map(Integer::from),
        any::<i8>().prop_map(Integer::from),
        any::<u16>().prop_map(Integer::from),
        any::<i16>().prop_map(Integer::from),
        any::<u32>().prop_map(Integer::from),
        any::<i32>().prop_map(Integer::from),
        any::<u64>().prop_map(Integer::from),
        any::<i64>().prop_map(Integer::from),
    ]
}

/// arbitrary Float for use with proptest, NaNs and infinities included
pub fn arb_float() -> impl Strategy<Value = Float> {
    prop_oneof![
        any::<u32>().prop_map(Float::Single),
        any::<u64>().prop_map(Float::Double),
        any::<f32>().prop_map(Float::from),
        any::<f64>().prop_map(Float::from),
        any::<u16>().prop_map(|n| Float::from(f16::from_bits(n))),
    ]
}

/// arbitrary Bytes for use with proptest
pub fn arb_raw() -> impl Strategy<Value = Bytes> {
    prop_oneof![
        8 => ".*".prop_map(Bytes::from),
        8 => prop::collection::vec(any::<u8>(), 0..40).prop_map(Bytes::from),
        // crosses the raw16 boundary
        1 => prop::collection::vec(any::<u8>(), 65_530..65_540).prop_map(Bytes::from),
    ]
}

/// arbitrary Value for use with proptest
///
/// Never produces [`Value::Packed`], which decodes as the value it holds.
pub fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Nil),
        any::<bool>().prop_map(Value::Bool),
        arb_integer().prop_map(Value::Int),
        arb_float().prop_map(Value::Float),
        arb_raw().prop_map(Value::Raw),
    ];
    leaf.prop_recursive(
        8,  // max depth
        64, // max nodes
        20, // max items per collection
        |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..20).prop_map(Value::Array),
                prop::collection::btree_map(inner.clone(), inner, 0..20)
                    .prop_map(|m| Value::Map(VecMap::from(m))),
            ]
        },
    )
}
