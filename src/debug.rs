use core::{fmt, ptr::NonNull};

use crate::{AvlTree, Links, TreeNode};

impl<T> AvlTree<T>
where
    T: TreeNode<Links<T>> + ?Sized,
{
    /// Writes a Graphviz rendering of the tree to `w`.
    ///
    /// Each node is labeled with its key and balance factor, so the output
    /// doubles as an exact structural snapshot of the tree.
    pub fn dotgraph<W: fmt::Write>(&self, name: &str, mut w: W) -> fmt::Result {
        writeln!(w, "digraph \"graph-{name}\" {{")?;

        if let Some(root) = self.root {
            unsafe { self.dotgraph_node(root, &mut w)? };
        }

        write!(w, "}}")
    }

    unsafe fn dotgraph_node<W: fmt::Write>(&self, node: NonNull<T>, w: &mut W) -> fmt::Result {
        unsafe {
            let key = node.as_ref().key();
            let balance = T::links(node).as_ref().balance();

            writeln!(w, "  \"{key:?}\" [label=\"{key:?} ({balance:+})\"];")?;

            let children = [
                (T::links(node).as_ref().left(), "L"),
                (T::links(node).as_ref().right(), "R"),
            ];

            for (child, side) in children {
                let Some(child) = child else {
                    continue;
                };

                writeln!(
                    w,
                    "  \"{key:?}\" -> \"{:?}\" [label=\"{side}\"];",
                    child.as_ref().key()
                )?;
                self.dotgraph_node(child, w)?;
            }

            Ok(())
        }
    }
}
