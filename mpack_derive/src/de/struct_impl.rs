use proc_macro2::TokenStream;
use quote::quote;
use syn::*;

pub fn struct_de(name: &Ident, data: &DataStruct) -> TokenStream {
    match &data.fields {
        // C-style structs
        Fields::Named(fields) => {
            let field_names = fields.named.iter().filter_map(|field| field.ident.as_ref());
            let exp_len = fields.named.len();

            quote! {
                ::mpack::encoding::Decoder::get_array_of(__d, #exp_len)?;
                Ok(#name {
                    #(#field_names: ::mpack::encoding::De::de(__d)?,)*
                })
            }
        }
        // Tuple structs
        Fields::Unnamed(fields) => {
            let exp_len = fields.unnamed.len();
            let takes = fields
                .unnamed
                .iter()
                .map(|_| quote! { ::mpack::encoding::De::de(__d)? });

            quote! {
                ::mpack::encoding::Decoder::get_array_of(__d, #exp_len)?;
                Ok(#name(#(#takes),*))
            }
        }
        // Unit-like structs
        Fields::Unit => quote! {
            ::mpack::encoding::Decoder::get_nil(__d)?;
            Ok(#name)
        },
    }
}
