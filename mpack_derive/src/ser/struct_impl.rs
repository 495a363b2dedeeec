use proc_macro2::{Literal, TokenStream};
use quote::quote;
use syn::*;

pub fn struct_ser(data: &DataStruct) -> TokenStream {
    match &data.fields {
        // C-style structs
        Fields::Named(fields) => {
            let field_idents = fields.named.iter().filter_map(|field| field.ident.as_ref());
            let length = fields.named.len();

            quote! {
                ::mpack::encoding::Encoder::emit_array(__e, #length)?;
                #(::mpack::encoding::Ser::ser(&self.#field_idents, __e)?;)*
                Ok(())
            }
        }
        // Tuple structs
        Fields::Unnamed(fields) => {
            let length = fields.unnamed.len();
            let idxs = (0..length).map(Literal::usize_unsuffixed);

            quote! {
                ::mpack::encoding::Encoder::emit_array(__e, #length)?;
                #(::mpack::encoding::Ser::ser(&self.#idxs, __e)?;)*
                Ok(())
            }
        }
        // Unit-like structs
        Fields::Unit => quote! { ::mpack::encoding::Encoder::emit_nil(__e) },
    }
}
