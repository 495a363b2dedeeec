#![recursion_limit = "128"]

extern crate proc_macro;

mod de;
mod ser;

use proc_macro::TokenStream;
use quote::quote;
use syn::*;

// Adds `bound` to every type parameter.
fn with_bound(generics: &Generics, bound: TypeParamBound) -> Generics {
    let mut generics = generics.clone();
    for param in generics.type_params_mut() {
        param.bounds.push(bound.clone());
    }
    generics
}

fn wrap(
    name: &Ident,
    generics: &Generics,
    ser_body: proc_macro2::TokenStream,
    de_body: proc_macro2::TokenStream,
) -> TokenStream {
    let ser_generics = with_bound(generics, parse_quote!(::mpack::encoding::Ser));
    let (ser_impl, ty_generics, ser_where) = ser_generics.split_for_impl();

    let de_generics = with_bound(generics, parse_quote!(::mpack::encoding::De));
    let (de_impl, _, de_where) = de_generics.split_for_impl();

    let imp = quote! {
        impl #ser_impl ::mpack::encoding::Ser for #name #ty_generics #ser_where {
            fn ser<__E: ::mpack::encoding::Encoder + ?Sized>(
                &self,
                __e: &mut __E,
            ) -> ::mpack::Result<()> {
                #ser_body
            }
        }

        impl #de_impl ::mpack::encoding::De for #name #ty_generics #de_where {
            fn de<__D: ::mpack::encoding::Decoder + ?Sized>(__d: &mut __D) -> ::mpack::Result<Self> {
                #de_body
            }
        }
    };

    imp.into()
}

/// Derives `Ser` and `De`.
///
/// Structs become a fixed-length array of their fields in declaration order, and unit
/// structs become nil. Enum unit variants become their name as a raw string; other
/// variants become an array of the name followed by the fields.
#[proc_macro_derive(MsgPack)]
pub fn msgpack_derive(input: TokenStream) -> TokenStream {
    let ast: DeriveInput = match syn::parse(input) {
        Ok(ast) => ast,
        Err(e) => return e.to_compile_error().into(),
    };

    let name = &ast.ident;

    match &ast.data {
        Data::Struct(sd) => wrap(
            name,
            &ast.generics,
            ser::struct_impl::struct_ser(sd),
            de::struct_impl::struct_de(name, sd),
        ),
        Data::Enum(ed) => wrap(
            name,
            &ast.generics,
            ser::enum_impl::enum_ser(name, ed),
            de::enum_impl::enum_de(name, ed),
        ),
        Data::Union(_) => Error::new_spanned(&ast.ident, "MsgPack cannot be derived for unions")
            .to_compile_error()
            .into(),
    }
}
