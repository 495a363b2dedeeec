use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::*;

pub fn enum_ser(name: &Ident, data: &DataEnum) -> TokenStream {
    let branches = data.variants.iter().map(|variant| {
        let variant_ident = &variant.ident;
        let name_string = variant_ident.to_string();

        match &variant.fields {
            // C-style
            Fields::Named(fields) => {
                let field_idents: Vec<&Ident> =
                    fields.named.iter().filter_map(|field| field.ident.as_ref()).collect();
                let seq_len = field_idents.len() + 1;

                quote! {
                    #name::#variant_ident { #(#field_idents),* } => {
                        ::mpack::encoding::Encoder::emit_array(__e, #seq_len)?;
                        ::mpack::encoding::Encoder::emit_raw(__e, #name_string.as_bytes())?;
                        #(::mpack::encoding::Ser::ser(#field_idents, __e)?;)*
                        Ok(())
                    }
                }
            }
            // Tuple
            Fields::Unnamed(fields) => {
                let field_idents: Vec<Ident> = (0..fields.unnamed.len())
                    .map(|i| Ident::new(&format!("field{}", i), Span::call_site()))
                    .collect();
                let seq_len = field_idents.len() + 1;

                quote! {
                    #name::#variant_ident(#(#field_idents),*) => {
                        ::mpack::encoding::Encoder::emit_array(__e, #seq_len)?;
                        ::mpack::encoding::Encoder::emit_raw(__e, #name_string.as_bytes())?;
                        #(::mpack::encoding::Ser::ser(#field_idents, __e)?;)*
                        Ok(())
                    }
                }
            }
            // Unit-like
            Fields::Unit => quote! {
                #name::#variant_ident => ::mpack::encoding::Encoder::emit_raw(__e, #name_string.as_bytes()),
            },
        }
    });

    if data.variants.is_empty() {
        quote! { match *self {} }
    } else {
        quote! {
            match self {
                #(#branches)*
            }
        }
    }
}
